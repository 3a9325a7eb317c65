use rand::SeedableRng;
use rand::rngs::StdRng;

/// Randomness used to shuffle a resample.
///
/// A plain `u64` converts into [RngSource::Seeded], so `ResampledDataset::shuffled(data, 7u64)`
/// yields the same order on every run. Pass a [StdRng] to continue an existing stream.
#[derive(Debug, Clone, Default)]
#[allow(clippy::large_enum_variant)]
pub enum RngSource {
    /// Fresh entropy from the operating system.
    #[default]
    Entropy,
    /// A fixed seed.
    Seeded(u64),
    /// A caller-owned generator.
    Rng(StdRng),
}

impl RngSource {
    /// Builds the generator.
    pub fn into_rng(self) -> StdRng {
        match self {
            Self::Entropy => StdRng::from_os_rng(),
            Self::Seeded(seed) => StdRng::seed_from_u64(seed),
            Self::Rng(rng) => rng,
        }
    }
}

impl From<u64> for RngSource {
    fn from(seed: u64) -> Self {
        Self::Seeded(seed)
    }
}

impl From<Option<u64>> for RngSource {
    fn from(seed: Option<u64>) -> Self {
        seed.map_or(Self::Entropy, Self::Seeded)
    }
}

impl From<StdRng> for RngSource {
    fn from(rng: StdRng) -> Self {
        Self::Rng(rng)
    }
}
