//! Block resolution: the override walk and the emission rule

use log::trace;

use super::chain::{BlockId, Chain, ViewId};

/// What to do with a block once its content is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// Write the content to the active output target now
    Emit,
    /// Keep the content only as a value for later override walks
    Hold,
}

/// Resolve a block that just closed in `view`
///
/// Applies the override walk, stores the resolved content on the block and
/// decides whether it becomes visible output now.
pub fn resolve(chain: &mut Chain, view: ViewId, block: BlockId) -> Emission {
    if let Some(content) = override_content(chain, view, block) {
        chain.set_content(block, content);
    }
    let emission = emission(chain, view, block);
    trace!(
        "block '{}' in '{}' resolved: {:?}",
        chain.block(block).name().unwrap_or_default(),
        chain.view(view).template(),
        emission
    );
    emission
}

/// Content of the leaf-most view that also declares this block
///
/// Walks from `view.previous` towards the leaf; later matches overwrite
/// earlier ones. Returns `None` when no leaf-ward view declares the name.
pub fn override_content(chain: &Chain, view: ViewId, block: BlockId) -> Option<String> {
    let name = chain.block(block).name()?;
    let mut content = None;
    for other in chain.leafward(view) {
        if let Some(found) = chain.view(other).find_block(name) {
            content = Some(chain.block(found).content());
        }
    }
    content.map(str::to_string)
}

/// The emission rule for a resolved block
pub fn emission(chain: &Chain, view: ViewId, block: BlockId) -> Emission {
    let node = chain.block(block);

    if chain.view(view).is_terminal() {
        return Emission::Emit;
    }

    // Nested blocks always write into their enclosing capture.
    if node.parent().is_some_and(|p| !chain.block(p).is_head()) {
        return Emission::Emit;
    }

    let Some(name) = node.name() else {
        return Emission::Hold;
    };
    let surfaced_later = chain
        .baseward(view)
        .any(|other| chain.view(other).declares(name));
    if surfaced_later {
        Emission::Hold
    } else {
        Emission::Emit
    }
}
