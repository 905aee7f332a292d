// src/tumor.rs
use std::fmt;

/// The classes the backend can assign to a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TumorTag {
    Glioma,
    Meningioma,
    Pituitary,
    NoTumor,
}

impl TumorTag {
    /// Filter chip order on the records screen.
    pub const ALL: [TumorTag; 4] = [
        TumorTag::Glioma,
        TumorTag::NoTumor,
        TumorTag::Pituitary,
        TumorTag::Meningioma,
    ];

    /// Case-insensitive match against the wire tags. Anything else is
    /// unrecognized and yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(raw.trim()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TumorTag::Glioma => "glioma",
            TumorTag::Meningioma => "meningioma",
            TumorTag::Pituitary => "pituitary",
            TumorTag::NoTumor => "notumor",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TumorTag::Glioma => "Glioma",
            TumorTag::Meningioma => "Meningioma",
            TumorTag::Pituitary => "Pituitary",
            TumorTag::NoTumor => "No Tumor",
        }
    }

    /// The learning-material entry for this tag. A clean scan has none.
    pub fn reference(self) -> Option<&'static TumorReference> {
        match self {
            TumorTag::Glioma => Some(&TUMOR_REFERENCES[0]),
            TumorTag::Meningioma => Some(&TUMOR_REFERENCES[1]),
            TumorTag::Pituitary => Some(&TUMOR_REFERENCES[2]),
            TumorTag::NoTumor => None,
        }
    }
}

impl fmt::Display for TumorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static learning material for one tumor type.
#[derive(Debug, PartialEq, Eq)]
pub struct TumorReference {
    pub tag: TumorTag,
    pub name: &'static str,
    pub short_description: &'static str,
    pub detailed_description: &'static str,
    pub symptoms: &'static [&'static str],
    pub treatment: &'static str,
    pub image_asset: &'static str,
}

impl TumorReference {
    pub fn all() -> &'static [TumorReference] {
        &TUMOR_REFERENCES
    }

    /// Looks an entry up by name, ignoring case.
    pub fn find(name: &str) -> Option<&'static TumorReference> {
        TUMOR_REFERENCES
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name.trim()))
    }
}

static TUMOR_REFERENCES: [TumorReference; 3] = [
    TumorReference {
        tag: TumorTag::Glioma,
        name: "Glioma",
        short_description: "Most common primary brain tumor",
        detailed_description: "Gliomas are tumors that arise from glial cells, which are the supportive cells in the brain. \
They are the most common type of primary brain tumor, accounting for about 80% of all \
malignant brain tumors. Gliomas can vary greatly in their aggressiveness and treatment approach.\n\n\
Gliomas are classified into different grades (I-IV) based on how abnormal the cells look \
under a microscope and how quickly they are likely to grow and spread.",
        symptoms: &[
            "Persistent headaches",
            "Seizures",
            "Nausea and vomiting",
            "Vision problems",
            "Speech difficulties",
            "Memory problems",
            "Personality changes",
            "Weakness or numbness in limbs",
        ],
        treatment: "Treatment typically involves a combination of surgery, radiation therapy, and chemotherapy. \
The specific treatment plan depends on the tumor's location, size, grade, and the patient's \
overall health. Complete surgical removal is often challenging due to the tumor's invasive nature.",
        image_asset: "sample_glioma_image",
    },
    TumorReference {
        tag: TumorTag::Meningioma,
        name: "Meningioma",
        short_description: "Tumor arising from brain's protective layers",
        detailed_description: "Meningiomas are tumors that develop from the meninges, the protective membranes that \
surround the brain and spinal cord. They are typically slow-growing and often benign, \
though some can be atypical or malignant.\n\n\
Meningiomas are more common in women than men and their incidence increases with age. \
They account for about 30% of all primary brain tumors.",
        symptoms: &[
            "Gradual onset headaches",
            "Vision changes or loss",
            "Hearing loss or ringing in ears",
            "Memory loss",
            "Seizures (less common)",
            "Weakness in arms or legs",
            "Difficulty with speech",
            "Changes in smell",
        ],
        treatment: "Treatment depends on the tumor's size, location, and growth rate. Small, asymptomatic \
meningiomas may just be monitored. Larger or symptomatic tumors typically require \
surgical removal. Radiation therapy may be used for tumors that cannot be completely \
removed or for recurrent tumors.",
        image_asset: "sample_meningioma_image",
    },
    TumorReference {
        tag: TumorTag::Pituitary,
        name: "Pituitary",
        short_description: "Tumor in the pituitary gland",
        detailed_description: "Pituitary tumors develop in the pituitary gland, a small pea-sized gland at the base \
of the brain that controls several other hormone-producing glands. Most pituitary tumors \
are benign (non-cancerous) adenomas.\n\n\
These tumors can be functional (producing excess hormones) or non-functional (not \
producing hormones). The symptoms depend on whether the tumor produces hormones and \
which hormones are affected.",
        symptoms: &[
            "Vision problems",
            "Headaches",
            "Unexplained weight gain or loss",
            "Fatigue and weakness",
            "Changes in menstrual periods",
            "Sexual dysfunction",
            "Growth abnormalities",
            "Mood changes",
            "Cold intolerance",
            "Excessive urination and thirst",
        ],
        treatment: "Treatment options include medication to control hormone levels, surgery to remove the \
tumor, and radiation therapy. The choice of treatment depends on the type and size of \
the tumor, hormone levels, and the patient's symptoms. Many pituitary tumors can be \
successfully treated with medication alone.",
        image_asset: "sample_pituitary_image",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case() {
        assert_eq!(TumorTag::parse("GLIOMA"), Some(TumorTag::Glioma));
        assert_eq!(TumorTag::parse("NoTumor"), Some(TumorTag::NoTumor));
        assert_eq!(TumorTag::parse("no tumor"), None);
        assert_eq!(TumorTag::parse(""), None);
    }

    #[test]
    fn every_reference_points_back_at_its_tag() {
        for tag in TumorTag::ALL {
            if let Some(entry) = tag.reference() {
                assert_eq!(entry.tag, tag);
                assert_eq!(TumorTag::parse(entry.name), Some(tag));
            }
        }
        assert_eq!(TumorReference::all().len(), 3);
    }

    #[test]
    fn find_by_name() {
        assert_eq!(TumorReference::find("meningioma").map(|t| t.name), Some("Meningioma"));
        assert_eq!(TumorReference::find("PITUITARY").map(|t| t.symptoms.len()), Some(10));
        assert!(TumorReference::find("astrocytoma").is_none());
    }
}
