// BERserk-style forgery of e=3 PKCS#1 v1.5 signatures

extern crate bignum;
extern crate rsa;

pub mod config;
pub mod errors;
pub mod forger;
pub mod registry;
pub mod root;
pub mod target;
pub mod template;
pub mod validate;

pub use crate::config::ForgeConfig;
pub use crate::errors::{ForgeError, ForgeFailure, PermanentKind, Result};
pub use crate::forger::{Forger, ModulusDescriptor};
pub use crate::registry::TemplateRegistry;
pub use crate::template::{DigestAlgorithm, DigestInfoTemplate, Layout};
pub use crate::validate::{validate, Verdict, Window};
