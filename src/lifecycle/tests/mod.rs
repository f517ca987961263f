mod service_tests;
mod support;
