use core::cell::{Cell, Ref, RefCell};
use core::fmt;
use std::rc::{Rc, Weak};

use serde::ser::{Serialize, SerializeSeq, SerializeTuple, Serializer};

use crate::color::{Color, ColorLink, NumberFormat};

/// A single gradient stop.
///
/// `offset` is expected in `[0, 1]`. A missing offset is spread evenly by
/// position when the gradient is painted.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    pub offset: Option<f64>,
    pub color: Color,
}

impl GradientStop {
    #[inline]
    pub fn new(color: Color, offset: f64) -> Self {
        Self { offset: Some(offset), color }
    }

    /// A stop positioned by its index in the stop list.
    #[inline]
    pub fn auto(color: Color) -> Self {
        Self { offset: None, color }
    }
}

impl fmt::Display for GradientStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(
                f,
                "{{ offset: {}, color: {} }}",
                NumberFormat::default().number(offset),
                self.color
            ),
            None => write!(f, "{{ color: {} }}", self.color),
        }
    }
}

/// Gradient definition shared by reference between gradient colors.
///
/// Every color that stores a gradient registers itself here; [`changed`]
/// clears the cached paint styles of all of them.
///
/// [`changed`]: Gradient::changed
pub struct Gradient {
    radial: Cell<bool>,
    stops: RefCell<Vec<GradientStop>>,
    owners: RefCell<Vec<Weak<ColorLink>>>,
}

impl Gradient {
    pub fn new(stops: Vec<GradientStop>, radial: bool) -> Self {
        Self {
            radial: Cell::new(radial),
            stops: RefCell::new(stops),
            owners: RefCell::new(Vec::new()),
        }
    }

    /// Shared linear gradient with stops at the given offsets.
    pub fn linear(stops: impl IntoIterator<Item = (Color, f64)>) -> Rc<Self> {
        Rc::new(Self::new(
            stops.into_iter().map(|(c, t)| GradientStop::new(c, t)).collect(),
            false,
        ))
    }

    /// Shared radial gradient with stops at the given offsets.
    pub fn radial(stops: impl IntoIterator<Item = (Color, f64)>) -> Rc<Self> {
        Rc::new(Self::new(
            stops.into_iter().map(|(c, t)| GradientStop::new(c, t)).collect(),
            true,
        ))
    }

    #[inline]
    pub fn is_radial(&self) -> bool {
        self.radial.get()
    }

    pub fn set_radial(&self, radial: bool) {
        self.radial.set(radial);
        self.changed();
    }

    pub fn stops(&self) -> Ref<'_, [GradientStop]> {
        Ref::map(self.stops.borrow(), Vec::as_slice)
    }

    pub fn set_stops(&self, stops: Vec<GradientStop>) {
        *self.stops.borrow_mut() = stops;
        self.changed();
    }

    pub fn push_stop(&self, stop: GradientStop) {
        self.stops.borrow_mut().push(stop);
        self.changed();
    }

    /// Invalidates every live color that uses this gradient and forgets the
    /// dropped ones.
    pub fn changed(&self) {
        let live: Vec<Rc<ColorLink>> = {
            let mut owners = self.owners.borrow_mut();
            owners.retain(|w| w.strong_count() > 0);
            owners.iter().filter_map(Weak::upgrade).collect()
        };
        log::trace!("gradient changed, invalidating {} colors", live.len());
        for link in live {
            link.invalidate();
        }
    }

    pub(crate) fn add_owner(&self, link: &Rc<ColorLink>) {
        let mut owners = self.owners.borrow_mut();
        owners.retain(|w| w.strong_count() > 0);
        let known = owners.iter().any(|w| core::ptr::eq(w.as_ptr(), Rc::as_ptr(link)));
        if !known {
            owners.push(Rc::downgrade(link));
        }
    }

    pub(crate) fn remove_owner(&self, link: &Rc<ColorLink>) {
        self.owners
            .borrow_mut()
            .retain(|w| w.strong_count() > 0 && !core::ptr::eq(w.as_ptr(), Rc::as_ptr(link)));
    }

    /// Number of live colors currently drawing with this gradient.
    pub fn owner_count(&self) -> usize {
        self.owners.borrow().iter().filter(|w| w.strong_count() > 0).count()
    }
}

impl PartialEq for Gradient {
    fn eq(&self, other: &Self) -> bool {
        self.is_radial() == other.is_radial() && *self.stops() == *other.stops()
    }
}

impl fmt::Debug for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gradient")
            .field("radial", &self.is_radial())
            .field("stops", &&*self.stops())
            .finish()
    }
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ stops: [")?;
        for (i, stop) in self.stops().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{stop}")?;
        }
        write!(f, "], radial: {} }}", self.is_radial())
    }
}

/// Serialized as `[color, offset]`; a missing offset is `null`.
impl Serialize for GradientStop {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.color)?;
        tuple.serialize_element(&self.offset)?;
        tuple.end()
    }
}

/// Serialized as `[[stops...], radial]`.
impl Serialize for Gradient {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Stops<'a>(&'a [GradientStop]);

        impl Serialize for Stops<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
                for stop in self.0 {
                    seq.serialize_element(stop)?;
                }
                seq.end()
            }
        }

        let stops = self.stops();
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&Stops(&stops))?;
        tuple.serialize_element(&self.is_radial())?;
        tuple.end()
    }
}
