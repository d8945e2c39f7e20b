pub mod use_lookups;
