/// Static disease catalog for canine skin conditions
///
/// The classifier only ever predicts one of these five labels. Each label
/// maps to a fixed symptom list and treatment text shown with the result.

use std::fmt;

/// A skin condition the classifier can predict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disease {
    Allergy,
    Infection,
    Mange,
    Normal,
    Tumor,
}

/// Symptom and treatment text for one disease
#[derive(Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Common symptoms, in display order
    pub symptoms: &'static [&'static str],
    /// Treatment suggestion paragraph
    pub treatment: &'static str,
}

impl Disease {
    /// Every catalog key, in the classifier's label order
    pub const ALL: [Disease; 5] = [
        Disease::Allergy,
        Disease::Infection,
        Disease::Mange,
        Disease::Normal,
        Disease::Tumor,
    ];

    /// The label the classifier uses for this disease
    pub fn label(self) -> &'static str {
        match self {
            Disease::Allergy => "Allergy",
            Disease::Infection => "Infection",
            Disease::Mange => "Mange",
            Disease::Normal => "Normal",
            Disease::Tumor => "Tumor",
        }
    }

    /// Parse a predicted label. Exact, case-sensitive match.
    pub fn from_label(label: &str) -> Option<Disease> {
        Self::ALL.into_iter().find(|d| d.label() == label)
    }

    /// The catalog entry for this disease
    pub fn entry(self) -> &'static CatalogEntry {
        match self {
            Disease::Allergy => &ALLERGY,
            Disease::Infection => &INFECTION,
            Disease::Mange => &MANGE,
            Disease::Normal => &NORMAL,
            Disease::Tumor => &TUMOR,
        }
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Look up a predicted label in the catalog.
///
/// Returns `None` for anything the catalog does not know, so callers must
/// handle the miss explicitly.
pub fn lookup(name: &str) -> Option<(Disease, &'static CatalogEntry)> {
    Disease::from_label(name).map(|disease| (disease, disease.entry()))
}

static ALLERGY: CatalogEntry = CatalogEntry {
    symptoms: &[
        "Itching and scratching",
        "Red, inflamed skin",
        "Hair loss",
        "Skin rash or hives",
        "Recurring ear infections",
        "Paw licking or chewing",
        "Rubbing face on surfaces",
    ],
    treatment: "Treatment typically involves identifying and eliminating the allergen if possible. \
        Medications like antihistamines, steroids, or immunotherapy may be prescribed. \
        Special shampoos and dietary changes can also help manage symptoms. \
        Regular bathing with hypoallergenic shampoos can provide relief.",
};

static INFECTION: CatalogEntry = CatalogEntry {
    symptoms: &[
        "Redness and swelling",
        "Pus or discharge",
        "Foul odor",
        "Excessive scratching or licking of affected area",
        "Pain when touched",
        "Crusty or scabby skin",
        "Hot spots (acute moist dermatitis)",
    ],
    treatment: "Bacterial infections usually require antibiotics, either topical, oral, or both. \
        Fungal infections need antifungal medications. \
        The affected area should be kept clean and dry. \
        In some cases, medicated shampoos or sprays may be recommended. \
        Complete the full course of medication even if symptoms improve.",
};

static MANGE: CatalogEntry = CatalogEntry {
    symptoms: &[
        "Intense itching",
        "Hair loss in patches or widespread",
        "Red, inflamed skin",
        "Crusty or scaly skin",
        "Sores and lesions",
        "Thickened skin (in chronic cases)",
        "Secondary infections",
    ],
    treatment: "Treatment depends on the type of mange (demodectic or sarcoptic). \
        Medications like ivermectin, milbemycin, or selamectin may be prescribed. \
        Medicated dips or shampoos containing benzoyl peroxide can help. \
        The living environment needs to be thoroughly cleaned to prevent reinfestation.",
};

static NORMAL: CatalogEntry = CatalogEntry {
    symptoms: &[
        "No visible skin abnormalities",
        "Regular coat appearance",
        "No excessive scratching or biting",
        "Skin is supple and elastic",
        "No redness or inflammation",
        "No unusual odor",
        "Normal shedding patterns",
    ],
    treatment: "Regular grooming, balanced diet, and routine veterinary check-ups are recommended \
        to maintain healthy skin and coat. Use dog-appropriate shampoos when bathing. \
        Monitor for any changes in skin condition.",
};

static TUMOR: CatalogEntry = CatalogEntry {
    symptoms: &[
        "Visible lump or growth on or under the skin",
        "Change in size, shape, or color of existing growth",
        "Sores that don't heal",
        "Bleeding or discharge from a growth",
        "Pain or tenderness in affected area",
        "Loss of appetite or weight loss",
        "Difficulty breathing or swallowing (if tumor affects these areas)",
    ],
    treatment: "Treatment depends on the type, size, and location of the tumor. \
        Options include surgical removal, chemotherapy, radiation therapy, or a combination approach. \
        Early detection and treatment significantly improve the prognosis. \
        Regular follow-up examinations are essential to monitor for recurrence.",
};
