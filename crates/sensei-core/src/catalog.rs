//! Static product metadata per bucket.
//!
//! The built-in catalog can be overridden from YAML; any bucket missing from
//! the file keeps its built-in entry:
//!
//! ```yaml
//! kumite:
//!   name: Kumite Strategy Playbook
//!   checkout_url: https://cart.example.com/kumite/
//!   tag: tc_kumite_core
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::bucket::Bucket;
use crate::checkout::CheckoutError;

/// Display name, destination URL template and attribution tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub checkout_url: String,
    pub tag: String,
}

impl Product {
    fn new(name: &str, checkout_url: &str, tag: &str) -> Self {
        Self {
            name: name.to_string(),
            checkout_url: checkout_url.to_string(),
            tag: tag.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Destination(#[from] CheckoutError),
}

/// One product per bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub kumite: Product,
    pub kata: Product,
    pub cond: Product,
    pub mind: Product,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            kumite: Product::new(
                "Kumite Strategy Playbook",
                "https://cart.strategicrebel.com/kumite-strategy-playbook/",
                "tc_kumite_core",
            ),
            kata: Product::new(
                "Kata Mastery Blueprint",
                "https://shotokankaraterebel.com/coming-soon/",
                "tc_kata_core",
            ),
            cond: Product::new(
                "Dojo Conditioning 30-Day",
                "https://shotokankaraterebel.com/coming-soon/",
                "tc_cond_core",
            ),
            mind: Product::new(
                "Mental Dojo Journal",
                "https://checkout.yourdomain.com/mental-dojo",
                "tc_mind_core",
            ),
        }
    }
}

impl Catalog {
    pub fn product(&self, bucket: Bucket) -> &Product {
        match bucket {
            Bucket::Kumite => &self.kumite,
            Bucket::Kata => &self.kata,
            Bucket::Conditioning => &self.cond,
            Bucket::Mind => &self.mind,
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load and validate a catalog file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check that every destination template parses as a URL.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        for bucket in Bucket::ALL {
            let product = self.product(bucket);
            url::Url::parse(&product.checkout_url).map_err(|source| {
                CheckoutError::MalformedDestination {
                    bucket,
                    template: product.checkout_url.clone(),
                    source,
                }
            })?;
        }
        Ok(())
    }
}
