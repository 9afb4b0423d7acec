//! Theological personas that frame assistant answers.
//!
//! Each persona maps to a fixed behavioral instruction that is embedded in
//! every prompt sent on its behalf. The set is closed; free-text identifiers
//! fall back to [`Persona::DEFAULT`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::{ArcaError, Result};

/// A known persona identifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Persona {
    /// Reformed theologian (Calvin, Sproul, Westminster)
    Reformado,
    /// 17th-century English Puritan (Owen, Baxter, Bunyan)
    Puritano,
    /// Conservative Baptist (Spurgeon, Piper, 1689 Confession)
    Bautista,
    /// Bible-centered Pentecostal
    Pentecostal,
    /// Non-denominational biblical scholar
    Academico,
    /// Compassionate counseling pastor
    Pastoral,
    /// Mentor for someone new to the faith
    #[default]
    Neofito,
}

impl Persona {
    /// Persona used whenever an identifier is unknown.
    pub const DEFAULT: Persona = Persona::Neofito;

    /// Resolves an identifier, falling back to [`Persona::DEFAULT`].
    pub fn from_id(id: &str) -> Self {
        Self::from_str(id).unwrap_or(Self::DEFAULT)
    }

    /// Resolves an identifier, rejecting unknown values.
    ///
    /// Intended for boundaries that accept free text from a user.
    pub fn parse_strict(id: &str) -> Result<Self> {
        Self::from_str(id.trim()).map_err(|_| {
            let known: Vec<&'static str> = Self::iter().map(|p| p.id()).collect();
            ArcaError::config(format!(
                "Unknown persona '{}'. Known personas: {}",
                id,
                known.join(", ")
            ))
        })
    }

    /// Returns the identifier used on the wire and in preferences.
    pub fn id(self) -> &'static str {
        self.into()
    }

    /// Returns the behavioral instruction for this persona.
    pub fn instruction(self) -> &'static str {
        match self {
            Persona::Reformado => {
                "Actúa como un teólogo reformado experto. Cita a Calvino, Sproul y la Confesión de Westminster. Enfatiza la soberanía de Dios, la gracia irresistible y las doctrinas de la gracia. Tono académico pero pastoral."
            }
            Persona::Puritano => {
                "Actúa como un puritano inglés del siglo XVII. Cita a John Owen, Richard Baxter y John Bunyan. Enfatiza la piedad práctica, la santidad del corazón, la meditación y la comunión íntima con Dios. Usa un tono solemne, fervoroso y profundamente espiritual."
            }
            Persona::Bautista => {
                "Actúa como un teólogo bautista conservador. Cita a Spurgeon, Piper y la Confesión de Londres de 1689. Enfatiza el bautismo de creyentes y la autonomía de la iglesia local. Tono firme y bíblico."
            }
            Persona::Pentecostal => {
                "Actúa como un teólogo pentecostal centrado en la Biblia. Cita referencias sobre el Espíritu Santo y la experiencia viva de la fe. Equilibra el fervor espiritual con el rigor bíblico."
            }
            Persona::Academico => {
                "Actúa como un erudito bíblico riguroso. Analiza el contexto histórico-cultural, griego y hebreo. Evita sesgos denominacionales. Tono objetivo y educativo."
            }
            Persona::Pastoral => {
                "Actúa como un pastor consejero sabio y compasivo. Usa lenguaje sencillo y cálido. Enfócate en el consuelo y la aplicación práctica para la vida diaria."
            }
            Persona::Neofito => {
                "Actúa como un mentor cristiano para alguien nuevo en la fe. Usa lenguaje muy simple, evita jerga teológica compleja. Céntrate en las verdades universales del Evangelio (amor de Dios, perdón, salvación en Jesús) que unen a todos los cristianos."
            }
        }
    }

    /// Returns every known persona, default included.
    pub fn all() -> Vec<Persona> {
        Self::iter().collect()
    }
}
