use crate::common_types::ResourceId;
use crate::queue::ProcessQueue;
use crate::scheduler::Pid;

/// An exclusive resource that processes acquire and release
#[derive(Clone, Debug)]
pub struct Resource {
    id: ResourceId,
    /// The process holding the resource
    owner: Option<Pid>,
    /// Processes blocked until the resource is released
    waitqueue: ProcessQueue,
}

impl Resource {
    pub fn new(id: ResourceId) -> Resource {
        Resource {
            id,
            owner: None,
            waitqueue: ProcessQueue::new(),
        }
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn owner(&self) -> Option<Pid> {
        self.owner
    }

    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    pub fn waitqueue(&self) -> &ProcessQueue {
        &self.waitqueue
    }

    pub(crate) fn waitqueue_mut(&mut self) -> &mut ProcessQueue {
        &mut self.waitqueue
    }

    pub(crate) fn set_owner(&mut self, owner: Option<Pid>) {
        self.owner = owner;
    }
}
