use crate::Error;

/// The initial number of entries an `AncestorStack` can hold without growing.
pub const DEFAULT_STACK_CAPACITY: usize = 32;

/// The hard limit on the number of simultaneously open elements.
pub const MAX_STACK_CAPACITY: usize = 256;


/// A bounded LIFO of open element handles.
///
/// The top of the stack is the node new children are inserted into.
/// Handles are only references into a tree owned elsewhere,
/// so dropping the stack never touches the nodes themselves.
///
/// The capacity doubles when the stack is full, starting from
/// [`DEFAULT_STACK_CAPACITY`] and never exceeding the maximum capacity.
///
/// [`DEFAULT_STACK_CAPACITY`]: constant.DEFAULT_STACK_CAPACITY.html
#[derive(Clone, Debug)]
pub struct AncestorStack<H> {
    nodes: Vec<H>,
    capacity: usize,
    max_capacity: usize,
}

impl<H: Copy> AncestorStack<H> {
    /// Creates a stack bounded by [`MAX_STACK_CAPACITY`].
    ///
    /// [`MAX_STACK_CAPACITY`]: constant.MAX_STACK_CAPACITY.html
    pub fn new() -> Self {
        Self::with_max_capacity(MAX_STACK_CAPACITY)
    }

    /// Creates a stack bounded by `max_capacity`.
    ///
    /// The value is clamped to `1..=MAX_STACK_CAPACITY`.
    pub fn with_max_capacity(max_capacity: usize) -> Self {
        let max_capacity = max_capacity.max(1).min(MAX_STACK_CAPACITY);
        let capacity = DEFAULT_STACK_CAPACITY.min(max_capacity);

        AncestorStack {
            nodes: Vec::with_capacity(capacity),
            capacity,
            max_capacity,
        }
    }

    /// Pushes a handle on top of the stack.
    ///
    /// # Errors
    ///
    /// Returns `Error::StackOverflow` when the stack is full
    /// and already at its maximum capacity.
    pub fn push(&mut self, handle: H) -> Result<(), Error> {
        if self.nodes.len() == self.capacity {
            if self.capacity == self.max_capacity {
                return Err(Error::StackOverflow(self.max_capacity));
            }

            let capacity = (self.capacity * 2).min(self.max_capacity);
            self.nodes.reserve_exact(capacity - self.nodes.len());
            debug!("ancestor stack grown from {} to {} entries", self.capacity, capacity);
            self.capacity = capacity;
        }

        self.nodes.push(handle);
        Ok(())
    }

    /// Removes the top handle and returns it.
    pub fn pop(&mut self) -> Option<H> {
        self.nodes.pop()
    }

    /// Returns the top handle.
    pub fn peek(&self) -> Option<H> {
        self.nodes.last().cloned()
    }

    /// Checks that the stack has no entries.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of entries the stack can hold before growing.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the ceiling the capacity can grow to.
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }
}

impl<H: Copy> Default for AncestorStack<H> {
    fn default() -> Self {
        Self::new()
    }
}
