use crate::foundation::error::SceneResult;
use crate::scene::builder::SceneBuilder;
use crate::scene::model::Scene;
use crate::scene::signature::SceneSignature;
use rand::Rng;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// Signatures of every scene accepted during one generation session.
///
/// Check-then-insert happens under a single lock, so concurrent tasks sharing one store can
/// never both accept the same scene.
#[derive(Debug, Default)]
pub struct SignatureStore {
    seen: Mutex<HashSet<SceneSignature>>,
}

impl SignatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `sig`; `false` when it was already present.
    pub fn insert(&self, sig: SceneSignature) -> bool {
        self.lock().insert(sig)
    }

    /// Record the scene's signature, returning it with `false` when the scene is a repeat.
    pub fn accept(&self, scene: &Scene) -> (SceneSignature, bool) {
        let sig = SceneSignature::of(scene);
        (sig, self.insert(sig))
    }

    pub fn contains(&self, sig: &SceneSignature) -> bool {
        self.lock().contains(sig)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<SceneSignature>> {
        // A panic elsewhere cannot leave a HashSet half-inserted; keep using it.
        self.seen.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A scene handed out by [`generate_unique`].
#[derive(Clone, Debug)]
pub struct UniqueScene {
    pub scene: Scene,
    pub signature: SceneSignature,
    /// `false` when the novelty budget ran out and a repeat was accepted anyway.
    pub fresh: bool,
    /// Number of scenes built to get here.
    pub attempts: u32,
}

/// Build scenes until one with an unseen signature turns up, at most `budget` times.
///
/// When the budget runs out the last repeat is accepted rather than failing the task.
/// Scene-building exhaustion is propagated unchanged.
#[tracing::instrument(skip(builder, store, rng))]
pub fn generate_unique<R: Rng + ?Sized>(
    builder: &SceneBuilder,
    store: &SignatureStore,
    rng: &mut R,
    budget: u32,
) -> SceneResult<UniqueScene> {
    let budget = budget.max(1);
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        let scene = builder.build(rng)?;
        let (signature, fresh) = store.accept(&scene);
        if fresh || attempts >= budget {
            if !fresh {
                tracing::warn!(budget, %signature, "no fresh scene within budget; accepting duplicate");
            }
            return Ok(UniqueScene {
                scene,
                signature,
                fresh,
                attempts,
            });
        }
        tracing::debug!(attempts, %signature, "duplicate scene rejected");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/dedup.rs"]
mod tests;
