use core::cell::RefCell;
use core::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::paint::PaintStyle;

use super::{convert, ColorError, Component, ComponentKind, Representation, StyleOwner};

static NEXT_GRADIENT_ID: AtomicU64 = AtomicU64::new(1);

// ── GradientId ────────────────────────────────────────────────────────────

/// Process-unique identifier carried by every gradient color.
///
/// Allocated when a gradient color is created; clones keep it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct GradientId(u64);

impl GradientId {
    fn next() -> Self {
        GradientId(NEXT_GRADIENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

// ── ColorLink ─────────────────────────────────────────────────────────────

/// Derived state shared between a color and the gradient it references.
///
/// Gradients hold weak references to links so that changing a gradient clears
/// the caches of every color drawing with it.
#[derive(Default)]
pub(crate) struct ColorLink {
    pub(crate) css: RefCell<Option<String>>,
    pub(crate) paint: RefCell<Option<PaintStyle>>,
    owner: RefCell<Option<Weak<dyn StyleOwner>>>,
}

impl ColorLink {
    /// Clears both caches and notifies the owner, if it is still alive.
    pub(crate) fn invalidate(&self) {
        self.css.borrow_mut().take();
        self.paint.borrow_mut().take();
        let owner = self.owner.borrow().as_ref().and_then(Weak::upgrade);
        if let Some(owner) = owner {
            owner.style_changed();
        }
    }
}

// ── Color ─────────────────────────────────────────────────────────────────

/// A color in one of five interchangeable representations.
///
/// Invariants:
/// - `components` follows the table of `repr` (the gradient highlight may be
///   missing, nothing else may)
/// - scalar components are in `[0, 1]`, hue in `[0, 360)`, alpha in `[0, 1]`
/// - gradient colors always carry a [`GradientId`]
///
/// Colors are single-threaded values: derived output is cached behind shared
/// cells and invalidated on every mutation.
pub struct Color {
    pub(crate) repr: Representation,
    pub(crate) components: Vec<Component>,
    pub(crate) alpha: Option<f64>,
    id: Option<GradientId>,
    pub(crate) link: Rc<ColorLink>,
}

impl Color {
    /// Builds a color from already normalized parts, bypassing argument parsing.
    pub(crate) fn create(
        repr: Representation,
        components: Vec<Component>,
        alpha: Option<f64>,
    ) -> Self {
        let id = (repr == Representation::Gradient).then(GradientId::next);
        Self::with_id(repr, components, alpha, id)
    }

    fn with_id(
        repr: Representation,
        components: Vec<Component>,
        alpha: Option<f64>,
        id: Option<GradientId>,
    ) -> Self {
        let color = Self { repr, components, alpha, id, link: Rc::default() };
        color.register_with_gradient();
        color
    }

    fn register_with_gradient(&self) {
        if let Some(Component::Gradient(gradient)) = self.components.first() {
            gradient.add_owner(&self.link);
        }
    }

    #[inline]
    pub fn representation(&self) -> Representation {
        self.repr
    }

    /// Identity of a gradient color; `None` for scalar representations.
    #[inline]
    pub fn id(&self) -> Option<GradientId> {
        self.id
    }

    /// Stored components, alpha excluded.
    #[inline]
    pub fn stored_components(&self) -> &[Component] {
        &self.components
    }

    /// Stored components followed by alpha, when alpha is set.
    pub fn components(&self) -> Vec<Component> {
        let mut components = self.components.clone();
        if let Some(alpha) = self.alpha {
            components.push(Component::Number(alpha));
        }
        components
    }

    /// Effective alpha: `1` when no alpha was set.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha.unwrap_or(1.0)
    }

    #[inline]
    pub fn raw_alpha(&self) -> Option<f64> {
        self.alpha
    }

    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }

    /// Sets (clamped to `[0, 1]`) or clears alpha.
    pub fn set_alpha(&mut self, alpha: impl Into<Option<f64>>) {
        self.alpha = alpha.into().map(|a| ComponentKind::Scalar.normalize(a));
        self.invalidate();
    }

    /// Registers the object to notify when this color changes.
    pub fn set_owner(&self, owner: Weak<dyn StyleOwner>) {
        *self.link.owner.borrow_mut() = Some(owner);
    }

    pub fn clear_owner(&self) {
        self.link.owner.borrow_mut().take();
    }

    pub fn owner(&self) -> Option<Rc<dyn StyleOwner>> {
        self.link.owner.borrow().as_ref().and_then(Weak::upgrade)
    }

    pub(crate) fn invalidate(&self) {
        self.link.invalidate();
    }

    /// Scalar components as plain numbers. Fails for gradient colors.
    pub(crate) fn numbers(&self, to: Representation) -> Result<Vec<f64>, ColorError> {
        if self.repr == Representation::Gradient {
            return Err(ColorError::UnsupportedConversion { from: self.repr, to });
        }
        Ok(self.components.iter().map(|c| c.as_number().unwrap_or(0.0)).collect())
    }

    /// Components expressed in `to`, without touching `self`.
    pub(crate) fn convert_components(
        &self,
        to: Representation,
    ) -> Result<Vec<Component>, ColorError> {
        if to == self.repr {
            return Ok(self.components.clone());
        }
        let converted = convert::convert(self.repr, to, &self.numbers(to)?)?;
        Ok(converted.into_iter().map(Component::Number).collect())
    }

    /// Returns a copy of this color in another representation, keeping alpha.
    pub fn convert(&self, to: Representation) -> Result<Color, ColorError> {
        if to == self.repr {
            return Ok(self.clone());
        }
        Ok(Color::create(to, self.convert_components(to)?, self.alpha))
    }

    /// Converts this color in place.
    pub fn set_representation(&mut self, to: Representation) -> Result<(), ColorError> {
        if to != self.repr {
            self.components = self.convert_components(to)?;
            self.repr = to;
            self.invalidate();
        }
        Ok(())
    }
}

impl Clone for Color {
    /// Copies representation, components, alpha and identity. Caches and the
    /// owner are not carried over.
    fn clone(&self) -> Self {
        Self::with_id(self.repr, self.components.clone(), self.alpha, self.id)
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.repr == other.repr && self.alpha == other.alpha && self.components == other.components
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Color")
            .field("repr", &self.repr)
            .field("components", &self.components)
            .field("alpha", &self.alpha)
            .field("id", &self.id)
            .finish()
    }
}
