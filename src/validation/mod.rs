pub mod registry_validation;
