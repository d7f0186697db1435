//! District name → district id lookup
//!
//! The table is fixed for a run and injected into the reconciler. Lookup is
//! exact: no trimming, no Unicode normalization, no fuzziness.

use cnr_common::{Error, Result};
use std::collections::{BTreeMap, HashMap};

/// The 77 districts of Nepal as spelled in the nomination export
///
/// Ids follow the election commission ordering (province by province).
pub const NEPAL_DISTRICTS: [(&str, i64); 77] = [
    // Koshi
    ("ताप्लेजुङ", 1),
    ("पाँचथर", 2),
    ("इलाम", 3),
    ("झापा", 4),
    ("संखुवासभा", 5),
    ("तेह्रथुम", 6),
    ("धनकुटा", 7),
    ("भोजपुर", 8),
    ("मोरङ", 9),
    ("सुनसरी", 10),
    ("सोलुखुम्बु", 11),
    ("खोटाङ", 12),
    ("ओखलढुङ्गा", 13),
    ("उदयपुर", 14),
    // Madhesh
    ("सप्तरी", 15),
    ("सिराहा", 16),
    ("धनुषा", 17),
    ("महोत्तरी", 18),
    ("सर्लाही", 19),
    ("रौतहट", 20),
    ("बारा", 21),
    ("पर्सा", 22),
    // Bagmati
    ("दोलखा", 23),
    ("रामेछाप", 24),
    ("सिन्धुली", 25),
    ("सिन्धुपाल्चोक", 26),
    ("काभ्रेपलाञ्चोक", 27),
    ("ललितपुर", 28),
    ("भक्तपुर", 29),
    ("काठमाडौं", 30),
    ("नुवाकोट", 31),
    ("रसुवा", 32),
    ("धादिङ", 33),
    ("मकवानपुर", 34),
    ("चितवन", 35),
    // Gandaki
    ("गोरखा", 36),
    ("लमजुङ", 37),
    ("तनहुँ", 38),
    ("स्याङ्जा", 39),
    ("कास्की", 40),
    ("मनाङ", 41),
    ("मुस्ताङ", 42),
    ("म्याग्दी", 43),
    ("पर्वत", 44),
    ("बागलुङ", 45),
    ("नवलपरासी (बर्दघाट सुस्ता पूर्व)", 46),
    // Lumbini
    ("नवलपरासी (बर्दघाट सुस्ता पश्चिम)", 47),
    ("रुपन्देही", 48),
    ("कपिलवस्तु", 49),
    ("पाल्पा", 50),
    ("अर्घाखाँची", 51),
    ("गुल्मी", 52),
    ("रुकुम (पूर्वी भाग)", 53),
    ("रोल्पा", 54),
    ("प्युठान", 55),
    ("दाङ", 56),
    ("बाँके", 57),
    ("बर्दिया", 58),
    // Karnali
    ("रुकुम (पश्चिम भाग)", 59),
    ("सल्यान", 60),
    ("डोल्पा", 61),
    ("हुम्ला", 62),
    ("जुम्ला", 63),
    ("कालिकोट", 64),
    ("मुगु", 65),
    ("सुर्खेत", 66),
    ("दैलेख", 67),
    ("जाजरकोट", 68),
    // Sudurpashchim
    ("बाजुरा", 69),
    ("बझाङ", 70),
    ("अछाम", 71),
    ("डोटी", 72),
    ("कैलाली", 73),
    ("कञ्चनपुर", 74),
    ("डडेल्धुरा", 75),
    ("बैतडी", 76),
    ("दार्चुला", 77),
];

/// Immutable district lookup table
#[derive(Debug, Clone)]
pub struct DistrictTable {
    by_name: HashMap<String, i64>,
}

impl DistrictTable {
    /// Build from (name, id) pairs
    ///
    /// Rejects duplicate names and two names sharing an id.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut by_name = HashMap::new();
        let mut by_id: HashMap<i64, String> = HashMap::new();

        for (name, id) in entries {
            let name = name.into();
            if by_name.contains_key(&name) {
                return Err(Error::Config(format!("District '{}' listed twice", name)));
            }
            if let Some(other) = by_id.get(&id) {
                return Err(Error::Config(format!(
                    "District id {} assigned to both '{}' and '{}'",
                    id, other, name
                )));
            }
            by_name.insert(name.clone(), id);
            by_id.insert(id, name);
        }

        Ok(Self { by_name })
    }

    /// Built-in table of Nepal's districts
    pub fn nepal() -> Self {
        Self {
            by_name: NEPAL_DISTRICTS
                .iter()
                .map(|(name, id)| (name.to_string(), *id))
                .collect(),
        }
    }

    /// Table from the optional `[districts]` config section, else built-in
    pub fn from_config(districts: Option<&BTreeMap<String, i64>>) -> Result<Self> {
        match districts {
            Some(map) if !map.is_empty() => {
                Self::from_entries(map.iter().map(|(name, id)| (name.clone(), *id)))
            }
            Some(_) => Err(Error::Config("[districts] table is empty".to_string())),
            None => Ok(Self::nepal()),
        }
    }

    /// District id for an exact display name
    pub fn resolve(&self, name: &str) -> Option<i64> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
