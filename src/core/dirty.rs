//! Per-tick change detection over the parameter set.

use super::params::{ParamId, ParameterSet};
use smallvec::SmallVec;

/// Parameters whose value changed since the previous tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirtySet(SmallVec<[ParamId; ParamId::COUNT]>);

impl DirtySet {
    #[inline]
    pub fn contains(&self, id: ParamId) -> bool {
        self.0.contains(&id)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ParamId> + '_ {
        self.0.iter().copied()
    }

    /// Any parameter that feeds the shader changed.
    pub fn any_uniform(&self) -> bool {
        self.0.iter().any(|id| id.is_uniform())
    }
}

/// Remembers the last value seen for every parameter.
///
/// Comparison is on the bit pattern: no epsilon, and a NaN that stays NaN is
/// not reported again.
#[derive(Clone, Debug)]
pub struct ChangeNotifier {
    last_seen: [Option<u32>; ParamId::COUNT],
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self {
            last_seen: [None; ParamId::COUNT],
        }
    }
}

impl ChangeNotifier {
    pub fn diff(&mut self, params: &ParameterSet) -> DirtySet {
        let mut dirty = DirtySet::default();
        for (id, value) in ParamId::ALL.iter().zip(params.values()) {
            let bits = value.to_bits();
            let slot = &mut self.last_seen[id.index()];
            if *slot != Some(bits) {
                dirty.0.push(*id);
            }
            *slot = Some(bits);
        }
        dirty
    }
}
