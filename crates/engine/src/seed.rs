//! Default taxonomy, cost centers and partners.
//!
//! The data lives in `data/seed.json` and is embedded at build time. A
//! different file with the same shape can be supplied with [`Seed::from_json`].

use serde::Deserialize;

use crate::{EngineError, MoneyCents, ResultEngine};

const EMBEDDED: &str = include_str!("../data/seed.json");

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SeedConta {
    pub name: String,
    pub categorias: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SeedNatureza {
    pub code: String,
    pub name: String,
    pub contas: Vec<SeedConta>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SeedPartner {
    pub name: String,
    #[serde(default)]
    pub initial_balance: MoneyCents,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Seed {
    pub version: u32,
    pub naturezas: Vec<SeedNatureza>,
    #[serde(default)]
    pub centros: Vec<String>,
    #[serde(default)]
    pub partners: Vec<SeedPartner>,
}

impl Seed {
    /// The seed shipped with the engine.
    pub fn embedded() -> ResultEngine<Self> {
        Self::from_json(EMBEDDED)
    }

    pub fn from_json(raw: &str) -> ResultEngine<Self> {
        let seed: Seed =
            serde_json::from_str(raw).map_err(|err| EngineError::InvalidSeed(err.to_string()))?;
        seed.validate()?;
        Ok(seed)
    }

    fn validate(&self) -> ResultEngine<()> {
        let mut codes = std::collections::HashSet::new();
        for natureza in &self.naturezas {
            if natureza.code.trim().is_empty() {
                return Err(EngineError::InvalidSeed("empty natureza code".to_string()));
            }
            if !codes.insert(natureza.code.as_str()) {
                return Err(EngineError::InvalidSeed(format!(
                    "duplicated natureza {}",
                    natureza.code
                )));
            }
        }
        Ok(())
    }

    pub fn categoria_count(&self) -> usize {
        self.naturezas
            .iter()
            .flat_map(|n| &n.contas)
            .map(|c| c.categorias.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_seed_parses() {
        let seed = Seed::embedded().unwrap();
        let codes: Vec<_> = seed.naturezas.iter().map(|n| n.code.as_str()).collect();
        assert_eq!(codes, vec!["RO", "RNO", "DO", "DNO"]);
        assert_eq!(seed.centros, vec!["Geral", "Soja", "Bovinos", "Ovinos"]);
        assert_eq!(seed.partners.len(), 2);
        assert_eq!(seed.categoria_count(), 127);
    }

    #[test]
    fn embedded_seed_has_capital_categorias() {
        let seed = Seed::embedded().unwrap();
        let names: Vec<&str> = seed
            .naturezas
            .iter()
            .flat_map(|n| &n.contas)
            .flat_map(|c| &c.categorias)
            .map(String::as_str)
            .collect();
        for expected in [
            "APORTE EDUARDO PAIM",
            "APORTE ROBERTO PAIM",
            "RETIRADAS EDUARDO PAIM",
            "RETIRADAS ROBERTO PAIM",
        ] {
            assert!(names.contains(&expected), "{expected} missing");
        }
    }

    #[test]
    fn rejects_duplicated_codes() {
        let raw = r#"{"version":1,"naturezas":[
            {"code":"RO","name":"A","contas":[]},
            {"code":"RO","name":"B","contas":[]}]}"#;
        assert!(matches!(Seed::from_json(raw), Err(EngineError::InvalidSeed(_))));
        assert!(matches!(Seed::from_json("{"), Err(EngineError::InvalidSeed(_))));
    }
}
