/// In-memory OPC package.
///
/// OpcPackage collects parts and package-level relationships until the
/// package is handed to [`PackageWriter`](crate::ooxml::opc::pkgwriter::PackageWriter)
/// for serialization.
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::Part;
use crate::ooxml::opc::rel::Relationships;
use std::collections::BTreeMap;

/// Main API type for assembling OPC packages.
pub struct OpcPackage {
    /// Package-level relationships
    rels: Relationships,

    /// All parts in the package, ordered by partname so output is stable
    parts: BTreeMap<String, Box<dyn Part>>,
}

impl OpcPackage {
    /// Create a new empty OPC package.
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI.to_string()),
            parts: BTreeMap::new(),
        }
    }

    /// Add a part, replacing any part with the same partname.
    pub fn add_part(&mut self, part: Box<dyn Part>) {
        let partname = part.partname().to_string();
        self.parts.insert(partname, part);
    }

    /// Get a part by its partname.
    pub fn get_part(&self, partname: &PackURI) -> Result<&dyn Part> {
        self.parts
            .get(partname.as_str())
            .map(|b| &**b as &dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Iterate over all parts in partname order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &dyn Part> {
        self.parts.values().map(|b| &**b as &dyn Part)
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Check if a part exists in the package.
    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.parts.contains_key(partname.as_str())
    }

    /// Package-level relationships (`/_rels/.rels`).
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Relate the package to a part, returning the relationship ID.
    pub fn relate_to(&mut self, target: &PackURI, reltype: &str) -> String {
        let target_ref = target.relative_ref(PACKAGE_URI);
        self.rels.get_or_add(reltype, &target_ref)
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
    use crate::ooxml::opc::part::BlobPart;

    #[test]
    fn test_add_and_relate() {
        let mut pkg = OpcPackage::new();
        let partname = PackURI::new("/ppt/presentation.xml").unwrap();
        pkg.add_part(Box::new(BlobPart::new(
            partname.clone(),
            ct::PML_PRESENTATION_MAIN,
            b"<p:presentation/>".to_vec(),
        )));

        let r_id = pkg.relate_to(&partname, rt::OFFICE_DOCUMENT);
        assert_eq!(r_id, "rId1");
        assert_eq!(pkg.part_count(), 1);
        assert!(pkg.contains_part(&partname));

        let rel = pkg.rels().part_with_reltype(rt::OFFICE_DOCUMENT).unwrap();
        assert_eq!(rel.target_ref(), "ppt/presentation.xml");
        assert_eq!(rel.target_partname().unwrap(), partname);
    }

    #[test]
    fn test_missing_part() {
        let pkg = OpcPackage::new();
        let partname = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        assert!(matches!(pkg.get_part(&partname), Err(OpcError::PartNotFound(_))));
    }
}
