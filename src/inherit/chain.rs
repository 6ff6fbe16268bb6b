//! Arena-backed inheritance chain
//!
//! A [`Chain`] owns every [`View`] and [`Block`] created during one render
//! call. Nodes refer to each other through [`ViewId`] and [`BlockId`] indices,
//! so the whole structure is dropped in one go when the render finishes.

use std::collections::HashMap;

use super::error::InheritError;

/// Index of a view inside its [`Chain`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(usize);

/// Index of a block inside its [`Chain`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(usize);

/// A named content region inside one view's block tree
#[derive(Debug, Clone)]
pub struct Block {
    /// Block name, `None` only for a view's head node
    name: Option<String>,
    parent: Option<BlockId>,
    /// Children in declaration order
    children: Vec<BlockId>,
    /// Resolved content, empty until the block closes during rendering
    content: String,
}

impl Block {
    fn head() -> Self {
        Self {
            name: None,
            parent: None,
            children: Vec::new(),
            content: String::new(),
        }
    }

    /// Block name (`None` for a head node)
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Enclosing block, `None` for a head node
    pub fn parent(&self) -> Option<BlockId> {
        self.parent
    }

    /// Child blocks in declaration order
    pub fn children(&self) -> &[BlockId] {
        &self.children
    }

    /// Resolved content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether this is a view's unnamed root
    pub fn is_head(&self) -> bool {
        self.parent.is_none()
    }
}

/// One template participating in the chain
#[derive(Debug, Clone)]
pub struct View {
    template: String,
    head: BlockId,
    /// The view that extended this one (towards the leaf)
    previous: Option<ViewId>,
    /// The view this one extends (towards the terminal)
    next: Option<ViewId>,
    names: HashMap<String, BlockId>,
}

impl View {
    /// Template name this view executes
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Root of this view's block tree
    pub fn head(&self) -> BlockId {
        self.head
    }

    /// Leaf-ward neighbour
    pub fn previous(&self) -> Option<ViewId> {
        self.previous
    }

    /// Base-ward neighbour
    pub fn next(&self) -> Option<ViewId> {
        self.next
    }

    /// Whether this view is the terminal of its chain
    pub fn is_terminal(&self) -> bool {
        self.next.is_none()
    }

    /// Whether any block in this view's tree has the given name
    pub fn declares(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Find a block anywhere in this view's tree
    pub fn find_block(&self, name: &str) -> Option<BlockId> {
        self.names.get(name).copied()
    }

    /// Number of named blocks in this view's tree
    pub fn block_count(&self) -> usize {
        self.names.len()
    }
}

/// The per-render arena of views and blocks
#[derive(Debug, Clone)]
pub struct Chain {
    views: Vec<View>,
    blocks: Vec<Block>,
}

impl Chain {
    /// Create a chain holding a single leaf view
    pub fn new(leaf: impl Into<String>) -> Self {
        let mut chain = Self {
            views: Vec::new(),
            blocks: Vec::new(),
        };
        chain.push_view(leaf.into(), None);
        chain
    }

    fn push_view(&mut self, template: String, previous: Option<ViewId>) -> ViewId {
        let head = BlockId(self.blocks.len());
        self.blocks.push(Block::head());

        let id = ViewId(self.views.len());
        self.views.push(View {
            template,
            head,
            previous,
            next: None,
            names: HashMap::new(),
        });
        id
    }

    /// The view where rendering starts
    pub fn leaf(&self) -> ViewId {
        ViewId(0)
    }

    /// The view with no further `extends`
    pub fn terminal(&self) -> ViewId {
        let mut id = self.leaf();
        while let Some(next) = self.view(id).next {
            id = next;
        }
        id
    }

    /// Number of views in the chain
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    pub fn view(&self, id: ViewId) -> &View {
        &self.views[id.0]
    }

    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.0]
    }

    /// Views from leaf to terminal
    pub fn views(&self) -> impl Iterator<Item = ViewId> + '_ {
        std::iter::successors(Some(self.leaf()), move |id| self.view(*id).next)
    }

    /// Views strictly leaf-ward of `id`, nearest first
    pub fn leafward(&self, id: ViewId) -> impl Iterator<Item = ViewId> + '_ {
        std::iter::successors(self.view(id).previous, move |id| self.view(*id).previous)
    }

    /// Views strictly base-ward of `id`, nearest first
    pub fn baseward(&self, id: ViewId) -> impl Iterator<Item = ViewId> + '_ {
        std::iter::successors(self.view(id).next, move |id| self.view(*id).next)
    }

    /// Template names from leaf to terminal
    pub fn templates(&self) -> Vec<String> {
        self.views()
            .map(|id| self.view(id).template.clone())
            .collect()
    }

    /// Link a new base view behind `from`
    ///
    /// Fails if `from` already extends something, or if `target` is already
    /// part of the chain.
    pub fn extend(&mut self, from: ViewId, target: &str) -> Result<ViewId, InheritError> {
        let view = self.view(from);
        if let Some(existing) = view.next {
            return Err(InheritError::Structure {
                view: view.template.clone(),
                first: self.view(existing).template.clone(),
                second: target.to_string(),
            });
        }

        if self.views.iter().any(|v| v.template == target) {
            let mut chain = self.templates();
            chain.push(target.to_string());
            return Err(InheritError::CircularExtend { chain });
        }

        let id = self.push_view(target.to_string(), Some(from));
        self.views[from.0].next = Some(id);
        Ok(id)
    }

    /// Declare a new block under `parent` in `view`
    pub fn open_block(
        &mut self,
        view: ViewId,
        parent: BlockId,
        name: &str,
    ) -> Result<BlockId, InheritError> {
        if self.view(view).declares(name) {
            return Err(InheritError::DuplicateBlock {
                view: self.view(view).template.clone(),
                name: name.to_string(),
            });
        }

        let id = BlockId(self.blocks.len());
        self.blocks.push(Block {
            name: Some(name.to_string()),
            parent: Some(parent),
            children: Vec::new(),
            content: String::new(),
        });
        self.blocks[parent.0].children.push(id);
        self.views[view.0].names.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn set_content(&mut self, block: BlockId, content: String) {
        self.blocks[block.0].content = content;
    }
}
