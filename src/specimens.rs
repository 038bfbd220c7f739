//! Reference specimen catalog for the virtual microscope
//!
//! A fixed set of thin-section specimens defined at startup, each with a
//! plane-polarized and a cross-polarized view and per-mineral optical
//! facts. The catalog is read-only and never mutated.

use serde::Serialize;

/// Broad rock classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RockClass {
    /// Crystallized from melt
    Igneous,
    /// Recrystallized under heat/pressure
    Metamorphic,
    /// Deposited and lithified
    Sedimentary,
}

impl std::fmt::Display for RockClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Igneous => write!(f, "Igneous"),
            Self::Metamorphic => write!(f, "Metamorphic"),
            Self::Sedimentary => write!(f, "Sedimentary"),
        }
    }
}

/// Polarization mode of a microscope view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarization {
    /// Plane-polarized light
    Ppl,
    /// Cross-polarized light
    Xpl,
}

impl std::fmt::Display for Polarization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ppl => write!(f, "PPL"),
            Self::Xpl => write!(f, "XPL"),
        }
    }
}

/// Optical and geological facts about one mineral in a specimen
#[derive(Debug, Clone, Serialize)]
pub struct MineralFact {
    /// Mineral name
    pub name: &'static str,
    /// Optical properties observable in thin section
    pub properties: &'static str,
    /// Geological significance
    pub significance: &'static str,
}

/// A catalog specimen with its two polarization views
#[derive(Debug, Clone, Serialize)]
pub struct Specimen {
    /// Stable identifier (e.g. "spec-1")
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Rock classification
    pub class: RockClass,
    /// Short description
    pub description: &'static str,
    /// Plane-polarized view image reference
    pub ppl_image: &'static str,
    /// Cross-polarized view image reference
    pub xpl_image: &'static str,
    /// Mineral facts, in catalog order
    pub minerals: Vec<MineralFact>,
}

impl Specimen {
    /// Image reference for the given polarization mode
    pub fn image_for(&self, polarization: Polarization) -> &'static str {
        match polarization {
            Polarization::Ppl => self.ppl_image,
            Polarization::Xpl => self.xpl_image,
        }
    }

    /// The microscope analysis question for this specimen
    pub fn analysis_question(&self, polarization: Polarization) -> String {
        format!(
            "Identify the minerals and explain the {} properties of this {}.",
            polarization, self.name
        )
    }
}

/// The fixed specimen catalog
pub fn catalog() -> Vec<Specimen> {
    vec![
        Specimen {
            id: "spec-1",
            name: "Basaltic Porphyry",
            class: RockClass::Igneous,
            description:
                "Fine-grained igneous rock with large phenocrysts of olivine and plagioclase.",
            ppl_image: "specimens/basaltic-porphyry-ppl.jpg",
            xpl_image: "specimens/basaltic-porphyry-xpl.jpg",
            minerals: vec![
                MineralFact {
                    name: "Olivine",
                    properties: "High relief, strong birefringence in XPL, no cleavage.",
                    significance:
                        "Indicates high-temperature crystallization from mantle-derived melt.",
                },
                MineralFact {
                    name: "Plagioclase",
                    properties: "Low relief, characteristic polysynthetic twinning in XPL.",
                    significance: "Essential component of basic to intermediate volcanic rocks.",
                },
            ],
        },
        Specimen {
            id: "spec-2",
            name: "Garnet-Mica Schist",
            class: RockClass::Metamorphic,
            description:
                "Medium-grade metamorphic rock with prominent schistosity and porphyroblasts.",
            ppl_image: "specimens/garnet-mica-schist-ppl.jpg",
            xpl_image: "specimens/garnet-mica-schist-xpl.jpg",
            minerals: vec![
                MineralFact {
                    name: "Garnet",
                    properties: "High relief, isotropic (stays dark in XPL).",
                    significance:
                        "Key index mineral for calculating metamorphic pressure and temperature.",
                },
                MineralFact {
                    name: "Biotite",
                    properties:
                        "Strong pleochroism in PPL (brown to straw-yellow), birdseye extinction.",
                    significance: "Forms via dehydration reactions during prograde metamorphism.",
                },
            ],
        },
        Specimen {
            id: "spec-3",
            name: "Foraminiferal Limestone",
            class: RockClass::Sedimentary,
            description: "Biogenic sedimentary rock containing remains of marine microorganisms.",
            ppl_image: "specimens/foraminiferal-limestone-ppl.jpg",
            xpl_image: "specimens/foraminiferal-limestone-xpl.jpg",
            minerals: vec![
                MineralFact {
                    name: "Calcite",
                    properties:
                        "Extremely high birefringence (pearl-grey to pink/green interference colors).",
                    significance:
                        "Primary carbonate mineral forming via biological or chemical precipitation.",
                },
                MineralFact {
                    name: "Micrite",
                    properties:
                        "Microcrystalline calcite, appears dark and muddy in thin section.",
                    significance: "Represents low-energy depositional environments.",
                },
            ],
        },
    ]
}

/// Look up a specimen by id
pub fn find(id: &str) -> Option<Specimen> {
    catalog().into_iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_three_specimens() {
        assert_eq!(catalog().len(), 3);
    }

    #[test]
    fn test_catalog_covers_all_rock_classes() {
        let classes: Vec<RockClass> = catalog().iter().map(|s| s.class).collect();
        assert!(classes.contains(&RockClass::Igneous));
        assert!(classes.contains(&RockClass::Metamorphic));
        assert!(classes.contains(&RockClass::Sedimentary));
    }

    #[test]
    fn test_every_specimen_has_two_views_and_minerals() {
        for specimen in catalog() {
            assert!(!specimen.ppl_image.is_empty());
            assert!(!specimen.xpl_image.is_empty());
            assert!(!specimen.minerals.is_empty());
        }
    }

    #[test]
    fn test_find_by_id() {
        let specimen = find("spec-2").unwrap();
        assert_eq!(specimen.name, "Garnet-Mica Schist");
        assert_eq!(specimen.class, RockClass::Metamorphic);
    }

    #[test]
    fn test_find_unknown_id() {
        assert!(find("spec-99").is_none());
    }

    #[test]
    fn test_image_for_polarization() {
        let specimen = find("spec-1").unwrap();
        assert_eq!(specimen.image_for(Polarization::Ppl), specimen.ppl_image);
        assert_eq!(specimen.image_for(Polarization::Xpl), specimen.xpl_image);
    }

    #[test]
    fn test_analysis_question_mentions_mode_and_name() {
        let specimen = find("spec-3").unwrap();
        let question = specimen.analysis_question(Polarization::Xpl);
        assert!(question.contains("XPL"));
        assert!(question.contains("Foraminiferal Limestone"));
    }
}
