//! The scheduling policies
//!
//! Every policy lives in its own file and implements the `Policy`
//! trait. FCFS supplies the default resource arbitration, the priority
//! based policies replace it.
//!

mod fcfs;
pub use fcfs::Fcfs;

mod sjf;
pub use sjf::ShortestJobFirst;

mod stcf;
pub use stcf::ShortestTimeToComplete;

mod round_robin;
pub use round_robin::RoundRobin;

mod priority;
pub use priority::PriorityScheduler;

mod priority_aging;
pub use priority_aging::PriorityAging;

mod pcp;
pub use pcp::PriorityCeiling;

mod pip;
pub use pip::PriorityInheritance;
