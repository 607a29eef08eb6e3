//! Tile entity type and its curriculum metadata
//!
//! A tile is one curriculum unit. The wire format has accumulated two
//! generations of curriculum metadata: the current one (`inhaltsfelder`,
//! `kompetenzen` with `bereich`/`punkte`, `weitere_vereinbarungen`) and a
//! legacy one (`inhaltsfeld` + `inhaltlicheSchwerpunkte`, `kompetenzen`
//! with `title`/`items`, `vereinbarungen`). Both are accepted; the raw
//! shapes are resolved into one normalized form during deserialization so
//! the rest of the crate never sees the split.

use serde::{Deserialize, Serialize};

/// Coarse schooling stage classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Sekundarstufe I (grades 6-10)
    #[serde(rename = "Sek I")]
    SekI,
    /// Sekundarstufe II (upper secondary)
    #[serde(rename = "Sek II")]
    SekII,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::SekI => write!(f, "Sek I"),
            Level::SekII => write!(f, "Sek II"),
        }
    }
}

/// Upper-secondary stage tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stage {
    Ef,
    Q1,
    Q2,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Ef => write!(f, "EF"),
            Stage::Q1 => write!(f, "Q1"),
            Stage::Q2 => write!(f, "Q2"),
        }
    }
}

/// Upper-secondary course tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Course {
    Ef,
    Gk,
    Lk,
}

impl std::fmt::Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Course::Ef => write!(f, "EF"),
            Course::Gk => write!(f, "GK"),
            Course::Lk => write!(f, "LK"),
        }
    }
}

/// One content field (Inhaltsfeld) of the curriculum, normalized
///
/// The legacy generation carries no code and lists its focus points under
/// `items`; both arrive here as `schwerpunkte`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "InhaltsfeldRepr")]
pub struct Inhaltsfeld {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub title: String,
    pub schwerpunkte: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InhaltsfeldRepr {
    Current {
        code: String,
        title: String,
        schwerpunkte: Vec<String>,
    },
    Legacy {
        title: String,
        items: Vec<String>,
    },
}

impl From<InhaltsfeldRepr> for Inhaltsfeld {
    fn from(raw: InhaltsfeldRepr) -> Self {
        match raw {
            InhaltsfeldRepr::Current {
                code,
                title,
                schwerpunkte,
            } => Inhaltsfeld {
                code: Some(code),
                title,
                schwerpunkte,
            },
            InhaltsfeldRepr::Legacy { title, items } => Inhaltsfeld {
                code: None,
                title,
                schwerpunkte: items,
            },
        }
    }
}

/// One competency grouping (Kompetenz), normalized
///
/// The legacy generation names the competency area `title` and its points
/// `items`; the current one uses `bereich` and `punkte`. Discriminated on
/// the field names present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "KompetenzRepr")]
pub struct Kompetenz {
    pub code: String,
    pub bereich: String,
    pub punkte: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KompetenzRepr {
    Current {
        code: String,
        bereich: String,
        punkte: Vec<String>,
    },
    Legacy {
        code: String,
        title: String,
        #[serde(default)]
        items: Vec<String>,
    },
}

impl From<KompetenzRepr> for Kompetenz {
    fn from(raw: KompetenzRepr) -> Self {
        match raw {
            KompetenzRepr::Current {
                code,
                bereich,
                punkte,
            } => Kompetenz {
                code,
                bereich,
                punkte,
            },
            KompetenzRepr::Legacy { code, title, items } => Kompetenz {
                code,
                bereich: title,
                punkte: items,
            },
        }
    }
}

/// Additional agreements (weitere Vereinbarungen) for a tile
///
/// The legacy `vereinbarungen` key only ever carries the first two lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vereinbarungen {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schwerpunktsetzung: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vernetzung: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synergien: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zusatz: Vec<String>,
}

/// Kind of classroom experiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperimentType {
    Simulation,
    Phyphox,
    #[serde(rename = "hands-on")]
    HandsOn,
    Virtual,
}

/// Difficulty rating for an experiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Einfach,
    Mittel,
    Schwer,
}

/// A smartphone experiment run through the phyphox app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhyphoxExperiment {
    pub id: String,
    pub title: String,
    pub description: String,

    #[serde(rename = "phyphoxUrl")]
    pub phyphox_url: String,

    #[serde(default, rename = "qrCode", skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,

    /// Sensors the experiment records
    pub sensors: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<String>,

    #[serde(
        default,
        rename = "expectedResults",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub expected_results: Vec<String>,
}

/// A classroom experiment attached to a tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub title: String,

    #[serde(rename = "type")]
    pub experiment_type: ExperimentType,

    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub procedure: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phyphox: Option<PhyphoxExperiment>,

    /// Duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

/// One curriculum unit
///
/// Identifiers are unique within the owning category. Curriculum metadata
/// is normalized on deserialization; see the module docs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "TileRepr")]
pub struct Tile {
    /// Unique identifier within the category
    pub id: String,

    /// Classification code (e.g. "6.3" or "Q1.1")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Grade level; absent for upper-secondary tiles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<u8>,

    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,

    /// Topic strings, order not significant
    pub topics: Vec<String>,

    /// Route the presentation layer navigates to
    pub route: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<Course>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub guiding_question: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_hours: Option<f64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inhaltsfelder: Vec<Inhaltsfeld>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub kompetenzen: Vec<Kompetenz>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vereinbarungen: Option<Vereinbarungen>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub experiments: Vec<Experiment>,

    /// Ids of canvas simulations available for this unit
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub simulations: Vec<String>,
}

/// Raw wire shape of a tile, carrying both metadata generations
#[derive(Deserialize)]
struct TileRepr {
    id: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    grade: Option<u8>,
    title: String,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    hours: Option<f64>,
    topics: Vec<String>,
    route: String,
    #[serde(default)]
    level: Option<Level>,
    #[serde(default)]
    stage: Option<Stage>,
    #[serde(default)]
    course: Option<Course>,
    #[serde(default)]
    guiding_question: Option<String>,
    #[serde(default)]
    time_hours: Option<f64>,
    #[serde(default)]
    inhaltsfelder: Option<Vec<Inhaltsfeld>>,
    #[serde(default)]
    kompetenzen: Vec<Kompetenz>,
    #[serde(default)]
    weitere_vereinbarungen: Option<Vereinbarungen>,
    // Legacy generation
    #[serde(default)]
    inhaltsfeld: Option<String>,
    #[serde(default, rename = "inhaltlicheSchwerpunkte")]
    inhaltliche_schwerpunkte: Option<Vec<Inhaltsfeld>>,
    #[serde(default)]
    vereinbarungen: Option<Vereinbarungen>,
    #[serde(default)]
    experiments: Vec<Experiment>,
    #[serde(default)]
    simulations: Vec<String>,
}

impl From<TileRepr> for Tile {
    fn from(raw: TileRepr) -> Self {
        // The current generation wins wherever both shapes are present.
        let inhaltsfelder = match raw.inhaltsfelder {
            Some(felder) => felder,
            None => {
                let mut felder = raw.inhaltliche_schwerpunkte.unwrap_or_default();
                if let Some(title) = raw.inhaltsfeld {
                    felder.insert(
                        0,
                        Inhaltsfeld {
                            code: None,
                            title,
                            schwerpunkte: Vec::new(),
                        },
                    );
                }
                felder
            }
        };
        let vereinbarungen = raw.weitere_vereinbarungen.or(raw.vereinbarungen);

        Tile {
            id: raw.id,
            code: raw.code,
            grade: raw.grade,
            title: raw.title,
            subtitle: raw.subtitle,
            description: raw.description,
            hours: raw.hours,
            topics: raw.topics,
            route: raw.route,
            level: raw.level,
            stage: raw.stage,
            course: raw.course,
            guiding_question: raw.guiding_question,
            time_hours: raw.time_hours,
            inhaltsfelder,
            kompetenzen: raw.kompetenzen,
            vereinbarungen,
            experiments: raw.experiments,
            simulations: raw.simulations,
        }
    }
}
