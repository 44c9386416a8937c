//! # stamp_template
//!
//! Template handling for cfstamp.
//!
//! Templates are plain text (usually CloudFormation JSON) carrying
//! `{{ name }}` placeholder tags. This crate covers:
//!
//! - Tag discovery, used to scaffold new data files
//! - Logic-less placeholder substitution
//! - JSON normalization so two documents can be compared structurally
//!
//! ## Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use stamp_template::{DocumentNormalizer, TagExtractor, TemplateRenderer};
//!
//! let template = r#"{"Type": "{{ instance_type }}"}"#;
//!
//! let tags = TagExtractor::new().extract(template);
//! assert!(tags.contains("instance_type"));
//!
//! let mut values = BTreeMap::new();
//! values.insert("instance_type".to_string(), "t2.micro".to_string());
//!
//! let rendered = TemplateRenderer::new().render(template, &values).unwrap();
//! assert_eq!(rendered, r#"{"Type": "t2.micro"}"#);
//!
//! let normalized = DocumentNormalizer::normalize(&rendered).unwrap();
//! assert_eq!(normalized, "{\n    \"Type\":\"t2.micro\"\n}");
//! ```

pub mod error;
pub mod normalize;
pub mod renderer;
pub mod tags;

pub use error::{TemplateError, TemplateResult};
pub use normalize::DocumentNormalizer;
pub use renderer::{MissingPolicy, TemplateRenderer};
pub use tags::TagExtractor;
