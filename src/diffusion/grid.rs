//! Grid-size schedules for extrapolation.

use crate::diffusion::EngineError;

/// Strictly increasing list of grid sizes, each at least 3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSchedule {
    points: Vec<usize>,
}

impl GridSchedule {
    pub fn new(points: Vec<usize>) -> Result<Self, EngineError> {
        if points.is_empty() {
            return Err(EngineError::InvalidGrid("at least one grid size is required".to_string()));
        }
        if let Some(p) = points.iter().find(|p| **p < 3) {
            return Err(EngineError::InvalidGrid(format!("grid size {p} is below the minimum of 3")));
        }
        if points.windows(2).any(|w| w[0] >= w[1]) {
            return Err(EngineError::InvalidGrid(format!(
                "grid sizes must be strictly increasing, got {points:?}"
            )));
        }
        Ok(Self { points })
    }

    /// `[n+10, n+20, n+30]` with `n` the larger sample size.
    ///
    /// Both axes share one grid, so `max(n1, n2)` sets it and the smaller sample
    /// gets the same resolution.
    pub fn default_for(sample_sizes: (usize, usize)) -> Self {
        let n = sample_sizes.0.max(sample_sizes.1);
        Self {
            points: vec![n + 10, n + 20, n + 30],
        }
    }

    /// Parse a comma-separated list such as `"40,50,60"`.
    pub fn parse(text: &str) -> Result<Self, EngineError> {
        let points = text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<usize>()
                    .map_err(|_| EngineError::InvalidGrid(format!("'{s}' is not a grid size")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(points)
    }

    pub fn points(&self) -> &[usize] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_follows_largest_sample() {
        assert_eq!(GridSchedule::default_for((18, 12)).points(), &[28, 38, 48]);
        assert_eq!(GridSchedule::default_for((12, 18)).points(), &[28, 38, 48]);
    }

    #[test]
    fn parse_accepts_spaces() {
        let g = GridSchedule::parse("40, 50,60").unwrap();
        assert_eq!(g.points(), &[40, 50, 60]);
    }

    #[test]
    fn rejects_bad_schedules() {
        assert!(GridSchedule::parse("").is_err());
        assert!(GridSchedule::parse("40,x").is_err());
        assert!(GridSchedule::new(vec![50, 40]).is_err());
        assert!(GridSchedule::new(vec![2, 10]).is_err());
        assert!(GridSchedule::new(vec![20, 20]).is_err());
    }
}
