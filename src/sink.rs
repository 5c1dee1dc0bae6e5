use std::fmt;


/// Tree construction primitives.
///
/// A sink owns the tree. Handles returned by it are opaque, cheap to copy
/// and never own the nodes they refer to.
pub trait TreeSink {
    /// A node handle.
    type Handle: Copy + PartialEq + fmt::Debug;

    /// Returns the document node.
    fn document(&self) -> Self::Handle;

    /// Creates a new, unattached element.
    fn new_element(&mut self, name: &str) -> Self::Handle;

    /// Creates a new, unattached text node.
    fn new_text(&mut self, text: &str) -> Self::Handle;

    /// Creates a new, unattached comment with `text` as its only child.
    fn new_comment(&mut self, text: Self::Handle) -> Self::Handle;

    /// Creates a new, unattached doctype.
    fn new_doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> Self::Handle;

    /// Appends `child` to the `parent` children list.
    ///
    /// Returns `false` when the sink refuses the operation.
    fn append_child(&mut self, parent: Self::Handle, child: Self::Handle) -> bool;

    /// Installs `node` as the document's root element.
    fn set_document_root(&mut self, node: Self::Handle);

    /// Adds an attribute to the `owner` element.
    fn new_attribute(&mut self, owner: Self::Handle, name: &str, value: Option<&str>);

    /// Returns element's tag name.
    fn element_name(&self, node: Self::Handle) -> Option<&str>;
}

impl<'a, S: TreeSink> TreeSink for &'a mut S {
    type Handle = S::Handle;

    fn document(&self) -> Self::Handle {
        (**self).document()
    }

    fn new_element(&mut self, name: &str) -> Self::Handle {
        (**self).new_element(name)
    }

    fn new_text(&mut self, text: &str) -> Self::Handle {
        (**self).new_text(text)
    }

    fn new_comment(&mut self, text: Self::Handle) -> Self::Handle {
        (**self).new_comment(text)
    }

    fn new_doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> Self::Handle {
        (**self).new_doctype(name, public_id, system_id)
    }

    fn append_child(&mut self, parent: Self::Handle, child: Self::Handle) -> bool {
        (**self).append_child(parent, child)
    }

    fn set_document_root(&mut self, node: Self::Handle) {
        (**self).set_document_root(node)
    }

    fn new_attribute(&mut self, owner: Self::Handle, name: &str, value: Option<&str>) {
        (**self).new_attribute(owner, name, value)
    }

    fn element_name(&self, node: Self::Handle) -> Option<&str> {
        (**self).element_name(node)
    }
}
