//! Tracing subscriber setup and per-algorithm timings.
//!
//! Every algorithm runs inside an `info_span!` named after it.  With the
//! `subscriber` feature enabled, [`init_tracing`] installs a subscriber that
//! prints events filtered by `RUST_LOG` to stderr and accumulates the time
//! spent in each span name; without the feature these functions are no-ops.

use std::time::Duration;

/// Accumulated time and call count for one span name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SpanTiming {
    pub name: &'static str,
    pub total: Duration,
    pub count: usize,
}

#[cfg(feature = "subscriber")]
mod enabled {
    use std::{cell::RefCell, collections::BTreeMap, io, sync::Once, time::Instant};

    use tracing_subscriber::{
        EnvFilter, Layer, Registry, fmt, layer::Context, layer::SubscriberExt,
        registry::LookupSpan, util::SubscriberInitExt,
    };

    use super::{Duration, SpanTiming};

    thread_local! {
        static TIMINGS: RefCell<BTreeMap<&'static str, (Duration, usize)>> =
            const { RefCell::new(BTreeMap::new()) };
    }

    struct TimingLayer;

    impl<S> Layer<S> for TimingLayer
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_new_span(
            &self,
            _attrs: &tracing::span::Attributes<'_>,
            id: &tracing::Id,
            ctx: Context<'_, S>,
        ) {
            if let Some(span) = ctx.span(id) {
                span.extensions_mut().insert(Instant::now());
            }
        }

        fn on_close(&self, id: tracing::Id, ctx: Context<'_, S>) {
            if let Some(span) = ctx.span(&id) {
                let name = span.metadata().name();
                if let Some(start) = span.extensions().get::<Instant>() {
                    let elapsed = start.elapsed();
                    TIMINGS.with(|totals| {
                        let mut totals = totals.borrow_mut();
                        let entry = totals.entry(name).or_insert((Duration::ZERO, 0));
                        entry.0 += elapsed;
                        entry.1 += 1;
                    });
                }
            }
        }
    }

    /// Installs the global subscriber.  Only the first call has an effect,
    /// and it does nothing if another subscriber is already installed.
    pub fn init_tracing() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let fmt_layer = fmt::layer()
                .with_writer(io::stderr)
                .with_filter(EnvFilter::from_default_env());
            let _ = Registry::default()
                .with(TimingLayer)
                .with(fmt_layer)
                .try_init();
        });
    }

    /// Gets the timings recorded on the current thread, slowest first.
    pub fn algorithm_timings() -> Vec<SpanTiming> {
        let mut timings: Vec<_> = TIMINGS.with(|totals| {
            totals
                .borrow()
                .iter()
                .map(|(&name, &(total, count))| SpanTiming { name, total, count })
                .collect()
        });
        timings.sort_by(|a, b| b.total.cmp(&a.total));
        timings
    }

    /// Discards the timings recorded on the current thread.
    pub fn reset_algorithm_timings() {
        init_tracing();
        TIMINGS.with(|totals| totals.borrow_mut().clear());
    }
}

#[cfg(not(feature = "subscriber"))]
mod disabled {
    use super::SpanTiming;

    pub fn init_tracing() {
        // No-op without the subscriber feature
    }

    pub fn algorithm_timings() -> Vec<SpanTiming> {
        Vec::new()
    }

    pub fn reset_algorithm_timings() {
        // No-op without the subscriber feature
    }
}

#[cfg(feature = "subscriber")]
pub use enabled::*;

#[cfg(not(feature = "subscriber"))]
pub use disabled::*;
