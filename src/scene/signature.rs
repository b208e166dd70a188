use crate::scene::model::Scene;
use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x5ce1_e5a7_0c1d_2b93;

/// 128-bit fingerprint of a scene, used for in-process deduplication only.
///
/// Built from the circle count, every circle's `(id, x, y, radius, color)` in id order, the
/// id sequence of the sorted row and `line_y`. Not cryptographic and never persisted as a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneSignature {
    pub hi: u64,
    pub lo: u64,
}

impl SceneSignature {
    pub fn of(scene: &Scene) -> Self {
        let mut h = StableHasher::new();

        h.write_u64(scene.count() as u64);
        // Hash in id order so the tuple list is canonical.
        let mut by_id: Vec<_> = scene.circles().iter().collect();
        by_id.sort_by_key(|c| c.id);
        for c in by_id {
            h.write_u64(c.id as u64);
            h.write_i64(c.initial.x.round() as i64);
            h.write_i64(c.initial.y.round() as i64);
            h.write_u32(c.radius);
            h.write_bytes(&[c.color.r, c.color.g, c.color.b]);
        }

        h.write_u64(scene.final_order().len() as u64);
        for &id in scene.final_order() {
            h.write_u64(id as u64);
        }
        h.write_i64(scene.line_y());

        h.finish()
    }

    /// 32 lowercase hex digits.
    pub fn to_hex(self) -> String {
        format!("{:016x}{:016x}", self.hi, self.lo)
    }
}

impl std::fmt::Display for SceneSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_i64(&mut self, v: i64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn finish(self) -> SceneSignature {
        let v = self.inner.digest128();
        SceneSignature {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/signature.rs"]
mod tests;
