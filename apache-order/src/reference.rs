use apache_shared::BookingReference;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

/// Issues booking references that are unique for the session.
///
/// Candidates are drawn at random and redrawn on collision, so a reference says
/// nothing about seat position or booking order. Issued references are never
/// handed out again, even after the booking they belonged to is canceled.
pub struct ReferenceGenerator {
    rng: StdRng,
    issued: HashSet<BookingReference>,
}

impl ReferenceGenerator {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic sequence, for tests and reproducible sessions.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            issued: HashSet::new(),
        }
    }

    pub fn generate(&mut self) -> BookingReference {
        // 36^8 candidates; a collision loop that does not end is not a practical concern.
        loop {
            let candidate = BookingReference::random(&mut self.rng);
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
            tracing::debug!(reference = %candidate, "Booking reference collision, redrawing");
        }
    }

    pub fn is_issued(&self, reference: &BookingReference) -> bool {
        self.issued.contains(reference)
    }

    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }
}

impl Default for ReferenceGenerator {
    fn default() -> Self {
        Self::new()
    }
}
