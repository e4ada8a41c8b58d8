use std::collections::HashMap;

use tracing::warn;

use crate::signals::ExponentialSweep;

/// The registry's one built-in entry: 10 seconds, 20 Hz to 20 kHz, at 44.1 kHz.
pub const DEFAULT_SIGNAL_ID: &str = "exp_sweep_20_20k_44";

const DEFAULT_SAMPLE_RATE: usize = 44_100;
const DEFAULT_DURATION_SECS: usize = 10;
const DEFAULT_START_HZ: f32 = 20.0;
const DEFAULT_END_HZ: f32 = 20_000.0;
const DEFAULT_AMPLITUDE: f32 = 0.9;

/// An immutable decoded reference sweep, keyed by signal id. Never mutated
/// after the registry that owns it is constructed.
#[derive(Debug, Clone)]
pub struct ReferenceSignal {
    pub id: String,
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

/// A single catalogue entry the registry will attempt to load at
/// construction time. `loader` is a fallible, caller-supplied closure since
/// decoding a reference signal from a container format is out of scope for
/// this crate - the caller owns that collaborator.
pub struct CatalogueEntry {
    pub id: String,
    pub loader: Box<dyn FnOnce() -> Result<(Vec<f32>, u32), String> + Send>,
}

impl CatalogueEntry {
    pub fn new(
        id: impl Into<String>,
        loader: impl FnOnce() -> Result<(Vec<f32>, u32), String> + Send + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            loader: Box::new(loader),
        }
    }
}

/// Holds decoded reference sweeps keyed by signal id. Immutable once built;
/// a failed catalogue entry is logged and simply absent from `get`, it never
/// fails construction of the registry itself.
#[derive(Debug, Clone, Default)]
pub struct ReferenceRegistry {
    signals: HashMap<String, ReferenceSignal>,
}

impl ReferenceRegistry {
    /// An empty registry with no entries. Useful as a starting point for
    /// `register`.
    pub fn empty() -> Self {
        Self {
            signals: HashMap::new(),
        }
    }

    /// Builds a registry whose sole entry is the canonical 20 Hz-20 kHz, 10 s
    /// exponential sweep at 44.1 kHz, synthesized in-process rather than read
    /// from a bundled asset.
    pub fn with_default_catalogue() -> Self {
        let entry = CatalogueEntry::new(DEFAULT_SIGNAL_ID, || {
            let n_samples = DEFAULT_SAMPLE_RATE * DEFAULT_DURATION_SECS;
            let samples = ExponentialSweep::new(
                DEFAULT_START_HZ,
                DEFAULT_END_HZ,
                DEFAULT_AMPLITUDE,
                n_samples,
                DEFAULT_SAMPLE_RATE,
            )
            .collect_samples();

            Ok((samples, DEFAULT_SAMPLE_RATE as u32))
        });

        Self::from_catalogue(vec![entry])
    }

    /// Runs every catalogue entry's loader once. A loader that fails is
    /// logged at `warn` and the id is simply absent from the registry -
    /// construction never fails.
    pub fn from_catalogue(entries: Vec<CatalogueEntry>) -> Self {
        let mut signals = HashMap::new();

        for entry in entries {
            match (entry.loader)() {
                Ok((samples, sample_rate)) => {
                    signals.insert(
                        entry.id.clone(),
                        ReferenceSignal {
                            id: entry.id,
                            samples,
                            sample_rate,
                        },
                    );
                }
                Err(reason) => {
                    warn!(signal_id = %entry.id, %reason, "failed to load reference signal, marking absent");
                }
            }
        }

        Self { signals }
    }

    /// Registers an already-decoded reference signal directly, for callers
    /// that have their own loader for on-disk reference WAVs.
    pub fn register(&mut self, signal: ReferenceSignal) {
        self.signals.insert(signal.id.clone(), signal);
    }

    pub fn get(&self, signal_id: &str) -> Option<&ReferenceSignal> {
        self.signals.get(signal_id)
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_catalogue_contains_canonical_sweep() {
        let registry = ReferenceRegistry::with_default_catalogue();

        let signal = registry.get(DEFAULT_SIGNAL_ID).expect("signal present");
        assert_eq!(signal.sample_rate, 44_100);
        assert_eq!(signal.samples.len(), 44_100 * 10);
        assert!(signal.samples.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn unknown_signal_is_absent() {
        let registry = ReferenceRegistry::with_default_catalogue();
        assert!(registry.get("does_not_exist").is_none());
    }

    #[test]
    fn failed_loader_marks_entry_absent_without_failing_construction() {
        let entries = vec![CatalogueEntry::new("broken", || Err("file missing".to_string()))];

        let registry = ReferenceRegistry::from_catalogue(entries);

        assert!(registry.is_empty());
        assert!(registry.get("broken").is_none());
    }

    #[test]
    fn register_adds_caller_supplied_signal() {
        let mut registry = ReferenceRegistry::empty();
        registry.register(ReferenceSignal {
            id: "custom".to_string(),
            samples: vec![0.0; 10],
            sample_rate: 48_000,
        });

        assert!(registry.get("custom").is_some());
    }
}
