/// Resource limits and cache size for a [`crate::LieEngine`].
#[derive(serde::Serialize, serde::Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of distinct weights in a weight system, and maximum
    /// size of a Weyl orbit.
    pub max_weights: usize,
    /// Maximum dimension of a tensor product before decomposing it.
    pub max_tensor_dim: u64,
    /// Number of results to keep in each cache. Zero disables caching.
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_weights: 1000,
            max_tensor_dim: 10_000,
            cache_capacity: 128,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_partial_config() {
        let config: EngineConfig = serde_json::from_str(r#"{"max_weights": 50}"#).unwrap();
        assert_eq!(
            config,
            EngineConfig {
                max_weights: 50,
                ..EngineConfig::default()
            },
        );
    }
}
