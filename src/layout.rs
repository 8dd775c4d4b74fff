//! Vertex layout descriptors.
//!
//! A [`VertexLayout`] says how the bytes of one vertex split into shader
//! attributes. Elements are laid out back to back in push order; the stride is
//! the sum of their byte widths.

use bytemuck::Pod;

/// Primitive component type of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttribType {
    /// `GL_FLOAT`.
    Float,
    /// `GL_UNSIGNED_INT`.
    UnsignedInt,
    /// `GL_UNSIGNED_BYTE`.
    UnsignedByte,
}

impl AttribType {
    /// Width of one component in bytes.
    #[must_use]
    pub const fn size(self) -> u32 {
        match self {
            Self::Float | Self::UnsignedInt => 4,
            Self::UnsignedByte => 1,
        }
    }

    /// The GL type enum.
    #[must_use]
    pub const fn gl_type(self) -> u32 {
        match self {
            Self::Float => glow::FLOAT,
            Self::UnsignedInt => glow::UNSIGNED_INT,
            Self::UnsignedByte => glow::UNSIGNED_BYTE,
        }
    }
}

/// Host types that can be pushed onto a [`VertexLayout`].
pub trait LayoutType: Pod {
    /// Matching GL component type.
    const ATTRIB: AttribType;
    /// Whether integer data is mapped to `[0, 1]` when read as float.
    const NORMALIZED: bool;
}

impl LayoutType for f32 {
    const ATTRIB: AttribType = AttribType::Float;
    const NORMALIZED: bool = false;
}

impl LayoutType for u32 {
    const ATTRIB: AttribType = AttribType::UnsignedInt;
    const NORMALIZED: bool = false;
}

impl LayoutType for u8 {
    const ATTRIB: AttribType = AttribType::UnsignedByte;
    const NORMALIZED: bool = true;
}

/// One attribute: `count` components of type `ty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayoutElement {
    /// Components per vertex (1 to 4).
    pub count: u32,
    /// Component type.
    pub ty: AttribType,
    /// Whether integer data is normalized.
    pub normalized: bool,
}

impl VertexLayoutElement {
    /// Width of the whole attribute in bytes.
    #[must_use]
    pub const fn byte_size(&self) -> u32 {
        self.count * self.ty.size()
    }
}

/// An ordered list of attributes making up one vertex.
///
/// ```
/// use gl_quad::VertexLayout;
///
/// let mut layout = VertexLayout::new();
/// layout.push::<f32>(2).push::<f32>(2);
/// assert_eq!(layout.stride(), 16);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexLayout {
    elements: Vec<VertexLayoutElement>,
    stride: u32,
}

impl VertexLayout {
    /// An empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `count` components of `T`.
    pub fn push<T: LayoutType>(&mut self, count: u32) -> &mut Self {
        self.push_element(VertexLayoutElement {
            count,
            ty: T::ATTRIB,
            normalized: T::NORMALIZED,
        })
    }

    /// Append an explicit element.
    pub fn push_element(&mut self, element: VertexLayoutElement) -> &mut Self {
        self.stride += element.byte_size();
        self.elements.push(element);
        self
    }

    /// Elements in push order. Element `i` feeds attribute location `i`.
    #[must_use]
    pub fn elements(&self) -> &[VertexLayoutElement] {
        &self.elements
    }

    /// Bytes per vertex.
    #[must_use]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Each element with its byte offset from the start of the vertex.
    pub fn offsets(&self) -> impl Iterator<Item = (&VertexLayoutElement, u32)> + '_ {
        self.elements.iter().scan(0, |offset, element| {
            let at = *offset;
            *offset += element.byte_size();
            Some((element, at))
        })
    }
}
