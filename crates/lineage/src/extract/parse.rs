//! Parsing one source file into a [`ModuleScan`].

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast_visit::Visit;
use oxc_parser::Parser;
use oxc_span::SourceType;

use super::ExtractError;
use super::items::ModuleScan;
use super::visitor::ItemCollector;

/// Parse `source` and collect its module items.
///
/// The source type is inferred from the file extension. A file with any
/// syntax error is rejected as a whole: a partial tree could silently drop
/// exports.
pub fn scan_module(path: &Path, source: &str) -> Result<ModuleScan, ExtractError> {
    let source_type = SourceType::from_path(path).unwrap_or_else(|_| SourceType::mjs());

    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, source, source_type).parse();

    if parsed.panicked || !parsed.errors.is_empty() {
        let message = parsed
            .errors
            .first()
            .map(ToString::to_string)
            .unwrap_or_else(|| "parser aborted".to_string());
        return Err(ExtractError::Parse {
            path: path.to_path_buf(),
            message,
        });
    }

    let mut collector = ItemCollector::default();
    collector.visit_program(&parsed.program);
    Ok(collector.into_scan())
}
