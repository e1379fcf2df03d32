use crate::error::{GpError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// Ordered source of stochastic decisions.
///
/// Every derived draw is built from [`RandomSource::next_uniform`], so an
/// operation consumes the same number of uniforms in the same order no matter
/// which implementation backs it. Replaying a recorded sequence therefore
/// reproduces the operation exactly.
pub trait RandomSource {
    /// Next value in `[0, 1)`.
    fn next_uniform(&mut self) -> Result<f64>;

    /// Number of uniforms consumed so far.
    fn draws(&self) -> usize;

    /// Index in `[0, n)` from exactly one uniform.
    fn next_int(&mut self, n: usize) -> Result<usize> {
        if n == 0 {
            return Err(GpError::Structural(
                "cannot draw an index from an empty range".to_string(),
            ));
        }
        let u = self.next_uniform()?;
        Ok(((u * n as f64) as usize).min(n - 1))
    }

    /// `k` distinct indices from `[0, n)`, partial Fisher-Yates.
    /// Step `i` consumes one `next_int(n - i)`.
    fn choose(&mut self, k: usize, n: usize) -> Result<Vec<usize>> {
        if k > n {
            return Err(GpError::Structural(format!(
                "cannot choose {} distinct indices out of {}",
                k, n
            )));
        }
        let mut pool: Vec<usize> = (0..n).collect();
        for i in 0..k {
            let j = i + self.next_int(n - i)?;
            pool.swap(i, j);
        }
        pool.truncate(k);
        Ok(pool)
    }
}

/// Production source backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
    draws: usize,
}

impl SeededRandom {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, draws: 0 }
    }
}

impl RandomSource for SeededRandom {
    fn next_uniform(&mut self) -> Result<f64> {
        self.draws += 1;
        Ok(self.rng.gen::<f64>())
    }

    fn draws(&self) -> usize {
        self.draws
    }
}

/// Replays a recorded fixture of uniforms, one per draw.
#[derive(Debug, Clone)]
pub struct ReplayRandom {
    values: Vec<f64>,
    position: usize,
}

impl ReplayRandom {
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if let Some((i, v)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(v.is_finite() && (0.0..1.0).contains(*v)))
        {
            return Err(GpError::Configuration(format!(
                "fixture value {} at index {} is outside [0, 1)",
                v, i
            )));
        }
        Ok(Self {
            values,
            position: 0,
        })
    }

    /// Parses whitespace separated floats. `#` starts a comment.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut values = Vec::new();
        for line in text.lines() {
            let content = line.split('#').next().unwrap_or("");
            for token in content.split_whitespace() {
                let value = token.parse::<f64>().map_err(|_| {
                    GpError::parse(values.len(), format!("invalid fixture value '{}'", token))
                })?;
                values.push(value);
            }
        }
        log::trace!("loaded replay fixture with {} values", values.len());
        Self::new(values)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_text(&text)
    }

    pub fn remaining(&self) -> usize {
        self.values.len() - self.position
    }
}

impl RandomSource for ReplayRandom {
    fn next_uniform(&mut self) -> Result<f64> {
        let value = self
            .values
            .get(self.position)
            .copied()
            .ok_or(GpError::ExhaustedSequence {
                consumed: self.position,
            })?;
        self.position += 1;
        Ok(value)
    }

    fn draws(&self) -> usize {
        self.position
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_uniform(&mut self) -> Result<f64> {
        (**self).next_uniform()
    }

    fn draws(&self) -> usize {
        (**self).draws()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_returns_values_in_order() {
        let mut rng = ReplayRandom::new(vec![0.1, 0.5, 0.9]).unwrap();
        assert_eq!(rng.next_uniform().unwrap(), 0.1);
        assert_eq!(rng.next_uniform().unwrap(), 0.5);
        assert_eq!(rng.remaining(), 1);
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn test_replay_exhaustion_is_reported() {
        let mut rng = ReplayRandom::new(vec![0.3]).unwrap();
        rng.next_uniform().unwrap();
        match rng.next_uniform() {
            Err(GpError::ExhaustedSequence { consumed }) => assert_eq!(consumed, 1),
            other => panic!("expected exhaustion, got {:?}", other),
        }
        // Still exhausted, never wraps around.
        assert!(rng.next_uniform().is_err());
    }

    #[test]
    fn test_replay_rejects_out_of_range_values() {
        assert!(matches!(
            ReplayRandom::new(vec![0.2, 1.0]),
            Err(GpError::Configuration(_))
        ));
        assert!(ReplayRandom::new(vec![f64::NAN]).is_err());
    }

    #[test]
    fn test_replay_from_text_with_comments() {
        let mut rng = ReplayRandom::from_text("0.25 0.5\n# skipped 0.9\n0.75 # tail\n").unwrap();
        assert_eq!(rng.remaining(), 3);
        assert_eq!(rng.next_uniform().unwrap(), 0.25);

        assert!(matches!(
            ReplayRandom::from_text("0.1 abc"),
            Err(GpError::Parse { position: 1, .. })
        ));
    }

    #[test]
    fn test_next_int_consumes_one_draw() {
        let mut rng = ReplayRandom::new(vec![0.0, 0.5, 0.999]).unwrap();
        assert_eq!(rng.next_int(9).unwrap(), 0);
        assert_eq!(rng.next_int(9).unwrap(), 4);
        assert_eq!(rng.next_int(9).unwrap(), 8);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn test_next_int_empty_range_draws_nothing() {
        let mut rng = ReplayRandom::new(vec![0.5]).unwrap();
        assert!(matches!(rng.next_int(0), Err(GpError::Structural(_))));
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn test_choose_distinct_indices() {
        // pool [0,1,2,3]: step 0 picks 0 + floor(0.9*4)=3, step 1 picks 1 + floor(0.0*3)=1
        let mut rng = ReplayRandom::new(vec![0.9, 0.0]).unwrap();
        assert_eq!(rng.choose(2, 4).unwrap(), vec![3, 1]);
        assert!(rng.choose(5, 4).is_err());
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SeededRandom::new(Some(42));
        let mut b = SeededRandom::new(Some(42));
        for _ in 0..16 {
            let x = a.next_uniform().unwrap();
            assert!((0.0..1.0).contains(&x));
            assert_eq!(x, b.next_uniform().unwrap());
        }
        assert_eq!(a.draws(), 16);
    }
}
