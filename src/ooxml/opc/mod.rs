/// Open Packaging Conventions (OPC) implementation.
///
/// The container layer of every `.pptx` file:
///
/// - Part names and relative relationship targets (`packuri`)
/// - Relationships between parts (`rel`)
/// - In-memory package assembly (`package`, `part`)
/// - Content type mapping and ZIP serialization (`pkgwriter`, `phys_pkg`)
/// - Read-only access for templates and read-back (`pkgreader`)
pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgreader;
pub mod pkgwriter;
pub mod rel;

// Re-export commonly used types
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::{BlobPart, Part};
pub use pkgreader::PackageReader;
pub use pkgwriter::PackageWriter;
pub use rel::{Relationship, Relationships};
