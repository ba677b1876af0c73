mod common;
mod lifecycle_tests;
mod selection_tests;
mod step_tests;
