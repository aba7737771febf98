use std::fmt;
use std::str::FromStr;

use crate::error::PipelineError;

/// Known device identifiers.
///
/// Identifiers usually name their own catalog record. Those listed in
/// [`ALIASES`] borrow another model's record instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Model {
    Og,
    OgPng,
    OgBmp,
    V2,
    AmazonKindle2024,
    AmazonKindlePaperwhite6thGen,
    AmazonKindlePaperwhite7thGen,
    Inkplate10,
    AmazonKindle7,
    InkyImpression7_3,
    KoboLibra2,
    AmazonKindleOasis2,
    OgPlus,
    KoboAuraOne,
    KoboAuraHd,
    InkyImpression13_3,
    M5PaperS3,
    AmazonKindleScribe,
    SeeedE1001,
    SeeedE1002,
    Waveshare4_26,
    Waveshare7_5Bw,
}

/// Identifier redirects applied before catalog lookup: (alias, target record).
pub const ALIASES: &[(&str, &str)] = &[("og", "og_plus")];

/// Resolve a model identifier to the catalog record name it reads.
pub fn resolve_alias(name: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, target)| *target)
        .unwrap_or(name)
}

impl Model {
    pub const ALL: [Model; 22] = [
        Model::Og,
        Model::OgPng,
        Model::OgBmp,
        Model::V2,
        Model::AmazonKindle2024,
        Model::AmazonKindlePaperwhite6thGen,
        Model::AmazonKindlePaperwhite7thGen,
        Model::Inkplate10,
        Model::AmazonKindle7,
        Model::InkyImpression7_3,
        Model::KoboLibra2,
        Model::AmazonKindleOasis2,
        Model::OgPlus,
        Model::KoboAuraOne,
        Model::KoboAuraHd,
        Model::InkyImpression13_3,
        Model::M5PaperS3,
        Model::AmazonKindleScribe,
        Model::SeeedE1001,
        Model::SeeedE1002,
        Model::Waveshare4_26,
        Model::Waveshare7_5Bw,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Model::Og => "og",
            Model::OgPng => "og_png",
            Model::OgBmp => "og_bmp",
            Model::V2 => "v2",
            Model::AmazonKindle2024 => "amazon_kindle_2024",
            Model::AmazonKindlePaperwhite6thGen => "amazon_kindle_paperwhite_6th_gen",
            Model::AmazonKindlePaperwhite7thGen => "amazon_kindle_paperwhite_7th_gen",
            Model::Inkplate10 => "inkplate_10",
            Model::AmazonKindle7 => "amazon_kindle_7",
            Model::InkyImpression7_3 => "inky_impression_7_3",
            Model::KoboLibra2 => "kobo_libra_2",
            Model::AmazonKindleOasis2 => "amazon_kindle_oasis_2",
            Model::OgPlus => "og_plus",
            Model::KoboAuraOne => "kobo_aura_one",
            Model::KoboAuraHd => "kobo_aura_hd",
            Model::InkyImpression13_3 => "inky_impression_13_3",
            Model::M5PaperS3 => "m5_paper_s3",
            Model::AmazonKindleScribe => "amazon_kindle_scribe",
            Model::SeeedE1001 => "seeed_e1001",
            Model::SeeedE1002 => "seeed_e1002",
            Model::Waveshare4_26 => "waveshare_4_26",
            Model::Waveshare7_5Bw => "waveshare_7_5_bw",
        }
    }

    /// Catalog record holding this model's data.
    pub fn record_name(&self) -> &'static str {
        resolve_alias(self.as_str())
    }
}

impl FromStr for Model {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Model::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| PipelineError::NotFound(s.to_string()))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
