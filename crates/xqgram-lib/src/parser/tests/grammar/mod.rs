mod constructors_tests;
mod exprs_tests;
mod flwor_tests;
mod full_text_tests;
mod prolog_tests;
mod types_tests;
mod update_tests;
