//! Core rust implementation of modelmap, a crate for normalizing the reaction and metabolite
//! identifiers of genome scale metabolic models onto a shared namespace so models built by
//! different reconstruction methods can be compared.

pub mod batch;
pub mod configuration;
pub mod io;
pub mod mapping;
pub mod metabolic_model;
pub mod translate;
