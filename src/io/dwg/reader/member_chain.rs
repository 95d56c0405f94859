//! Walking the members of a block record or polyline.
//!
//! Before R2004 an owner stores only its first and last member and every
//! member stores the handle of the next one, so the chain can only be
//! followed by decoding each member in turn. From R2004 the owner lists all
//! of its members. [`MemberWalk`] hides the difference: the caller asks for
//! the next handle, decodes it, and reports the next link it found.

use ahash::AHashSet;

use crate::tables::MemberChain;
use crate::types::Handle;

#[derive(Debug)]
enum WalkState {
    Linked {
        current: Handle,
        last: Handle,
        visited: AHashSet<Handle>,
    },
    Ordered {
        handles: Vec<Handle>,
        index: usize,
    },
    Done,
}

/// Cursor over a [`MemberChain`].
#[derive(Debug)]
pub struct MemberWalk {
    state: WalkState,
    /// Handle handed out by the last `next_handle` call.
    pending: Option<Handle>,
}

impl MemberWalk {
    pub fn new(chain: &MemberChain) -> Self {
        let state = match chain {
            MemberChain::Linked { first, last } if !first.is_null() => WalkState::Linked {
                current: *first,
                last: *last,
                visited: AHashSet::new(),
            },
            MemberChain::Linked { .. } => WalkState::Done,
            MemberChain::Ordered(handles) => WalkState::Ordered {
                handles: handles.clone(),
                index: 0,
            },
        };
        Self { state, pending: None }
    }

    /// `true` when the members have to be decoded to find the next one.
    pub fn is_linked(&self) -> bool {
        matches!(self.state, WalkState::Linked { .. })
    }

    /// Next member to decode, or `None` once the walk is over.
    ///
    /// A linked walk stops after the last member, on a null link, or when a
    /// link leads back to a member already visited.
    pub fn next_handle(&mut self) -> Option<Handle> {
        let next = match &mut self.state {
            WalkState::Linked { current, visited, .. } => {
                if current.is_null() || !visited.insert(*current) {
                    None
                } else {
                    Some(*current)
                }
            }
            WalkState::Ordered { handles, index } => {
                let next = handles.get(*index).copied();
                *index += 1;
                next
            }
            WalkState::Done => None,
        };
        if next.is_none() {
            self.state = WalkState::Done;
        }
        self.pending = next;
        next
    }

    /// Report the outcome of the member last returned by
    /// [`next_handle`](Self::next_handle).
    ///
    /// `next_link` is the next-entity handle the member stored, or `None`
    /// when the member could not be found or decoded. In that case a linked
    /// walk jumps to the last member. Ordered walks ignore the report.
    pub fn advance(&mut self, next_link: Option<Handle>) {
        let Some(member) = self.pending.take() else {
            return;
        };
        if let WalkState::Linked { current, last, .. } = &mut self.state {
            if member == *last {
                self.state = WalkState::Done;
                return;
            }
            *current = next_link.unwrap_or(*last);
        }
    }
}
