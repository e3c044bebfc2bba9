//! Building blocks shared by the policies: the default resource
//! arbitration and the candidate scans over a queue.

use crate::common_types::ResourceId;
use crate::process_control_block::ProcessControlBlock;
use crate::process_manager::ProcessManager;
use crate::queue::ProcessQueue;
use crate::scheduler::Pid;
use crate::scheduler_info::SchedulerInfo;

fn current_pid(info: &SchedulerInfo) -> Pid {
    match info.current() {
        Some(pid) => pid,
        None => panic!("resource operation without a current process"),
    }
}

/// Grants a free resource to the current process, otherwise appends
/// the current process to the tail of the wait queue and blocks it
pub fn acquire_or_block(info: &mut SchedulerInfo, resource: ResourceId) -> bool {
    let pid = current_pid(info);

    if !info.res(resource).is_owned() {
        info.res_mut(resource).set_owner(Some(pid));
        return true;
    }

    info.block_process(pid, resource);
    log::debug!(
        "{pid} blocks on {resource} held by {:?}",
        info.res(resource).owner()
    );

    false
}

/// Clears the ownership of `resource` and returns the outgoing owner
///
/// Only the current process may release what it owns.
pub fn release_ownership(info: &mut SchedulerInfo, resource: ResourceId) -> Pid {
    let owner = info.res(resource).owner();
    let current = info.current();

    let pid = match owner {
        Some(pid) if Some(pid) == current => pid,
        _ => panic!("{resource} released by {current:?} but owned by {owner:?}"),
    };

    info.res_mut(resource).set_owner(None);
    pid
}

/// Wakes the waiter that came first
pub fn wake_first_waiter(info: &mut SchedulerInfo, resource: ResourceId) -> Option<Pid> {
    let waiter = info.res(resource).waitqueue().front()?;
    info.unblock_process(waiter, resource);

    Some(waiter)
}

/// Wakes the waiter with the highest priority, the earliest one on ties
pub fn wake_highest_waiter(info: &mut SchedulerInfo, resource: ResourceId) -> Option<Pid> {
    let waiter = highest_priority(info, info.res(resource).waitqueue())?;
    info.unblock_process(waiter, resource);

    Some(waiter)
}

/// Returns the process with the highest priority in `queue`
///
/// Ties go to the process closest to the head.
pub fn highest_priority(info: &SchedulerInfo, queue: &ProcessQueue) -> Option<Pid> {
    let mut best: Option<&ProcessControlBlock> = None;

    for pid in queue.iter() {
        let pcb = info.pcb(pid);
        match best {
            Some(chosen) if pcb.priority() <= chosen.priority() => (),
            _ => best = Some(pcb),
        }
    }

    best.map(|pcb| pcb.pid())
}

/// Returns the process with the smallest `key` in `queue`
///
/// Ties go to the process closest to the head.
pub fn min_by_key<F>(info: &SchedulerInfo, queue: &ProcessQueue, key: F) -> Option<Pid>
where
    F: Fn(&ProcessControlBlock) -> usize,
{
    let mut best: Option<(Pid, usize)> = None;

    for pid in queue.iter() {
        let value = key(info.pcb(pid));
        match best {
            Some((_, chosen)) if value >= chosen => (),
            _ => best = Some((pid, value)),
        }
    }

    best.map(|(pid, _)| pid)
}

/// Puts `current` back at the tail of the ready queue and takes `next`
/// out of it
pub fn preempt(info: &mut SchedulerInfo, current: Pid, next: Pid) {
    info.remove_from_ready(next);
    info.enqueue_process(current);

    log::debug!("{next} preempts {current}");
}

/// Priority selection shared by the strict priority protocols
///
/// The highest priority ready process replaces the current one only if
/// its priority is strictly higher. Otherwise a runnable current process
/// keeps the CPU.
pub fn pick_by_priority(info: &mut SchedulerInfo) -> Option<Pid> {
    let candidate = highest_priority(info, info.ready());

    match (info.runnable_current(), candidate) {
        (current, None) => current,
        (None, Some(next)) => {
            info.remove_from_ready(next);
            Some(next)
        }
        (Some(current), Some(next)) => {
            if info.pcb(next).priority() > info.pcb(current).priority() {
                preempt(info, current, next);
                Some(next)
            } else {
                Some(current)
            }
        }
    }
}
