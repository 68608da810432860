mod lenient_tests;
mod strict_tests;
