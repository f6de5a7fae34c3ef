// Application layer: concrete upstream sources plugged into the lookup handler.

pub mod sources;
