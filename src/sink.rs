//! Destinations for measured values.
//!
//! A sink can be attached to each reported channel. Channels without a sink are simply not
//! reported.

/// Receives one value per measurement cycle.
pub trait ValueSink {
    fn publish(&mut self, value: f32);
}

/// Placeholder sink type for drivers that do not report any channel.
pub struct NoSink;

impl ValueSink for NoSink {
    fn publish(&mut self, _value: f32) {}
}

impl<T: ValueSink + ?Sized> ValueSink for &mut T {
    fn publish(&mut self, value: f32) {
        (**self).publish(value)
    }
}

/// One optional sink per reported channel.
pub struct Sinks<S> {
    pub(crate) uv_index: Option<S>,
    pub(crate) uva: Option<S>,
    pub(crate) uvb: Option<S>,
    pub(crate) uvcomp1: Option<S>,
    pub(crate) uvcomp2: Option<S>,
}

impl<S> Default for Sinks<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Sinks<S> {
    /// No channel is reported.
    pub fn new() -> Self {
        Self {
            uv_index: None,
            uva: None,
            uvb: None,
            uvcomp1: None,
            uvcomp2: None,
        }
    }

    pub fn uv_index(mut self, sink: S) -> Self {
        self.uv_index = Some(sink);

        self
    }

    /// Raw UVA count.
    pub fn uva(mut self, sink: S) -> Self {
        self.uva = Some(sink);

        self
    }

    /// Raw UVB count.
    pub fn uvb(mut self, sink: S) -> Self {
        self.uvb = Some(sink);

        self
    }

    pub fn uvcomp1(mut self, sink: S) -> Self {
        self.uvcomp1 = Some(sink);

        self
    }

    pub fn uvcomp2(mut self, sink: S) -> Self {
        self.uvcomp2 = Some(sink);

        self
    }
}

#[inline]
pub(crate) fn publish<S: ValueSink>(sink: &mut Option<S>, value: f32) {
    if let Some(sink) = sink {
        sink.publish(value);
    }
}
