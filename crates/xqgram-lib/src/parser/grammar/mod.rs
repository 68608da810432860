//! Grammar productions, one `impl Parser` block per area of the language.
//!
//! Every function here parses exactly one production (or a tightly related
//! family) and leaves the cursor after the last token it recognized. On a
//! syntax error a production reports and returns without consuming the
//! offending token; the nearest enclosing loop or the module driver decides
//! how to resynchronize.

mod constructors;
mod exprs;
mod full_text;
mod module;
mod paths;
mod types;
mod update;
