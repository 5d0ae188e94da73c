use std::fmt;
use std::str::FromStr;

use crate::query::error::QueryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryGroup {
    Primary,
    Learner,
}

/// Every canned query the tool can run. Each statement is a literal; the
/// only values baked into them are artifact 227994 and the hue "Grey".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CannedQuery {
    ByzantineEleventhCentury,
    UniqueCultures,
    ArchaicPeriod,
    TitlesByAccessionYear,
    ArtifactsPerDepartment,
    MoreThanOneImage,
    AverageRank,
    ColorcountAboveMediacount,
    CreatedBetween1500And1600,
    WithoutMediaFiles,
    DistinctHues,
    TopFiveColors,
    AverageCoverageByHue,
    ColorsOfArtifact,
    TotalColorEntries,
    ByzantineTitlesAndHues,
    TitlesWithHues,
    RanksWherePeriodKnown,
    TopRankedGreyArtifacts,
    ClassificationMediaAverage,
    TopFiveDepartments,
    AverageColorCountPerCulture,
    MediaWithoutColor,
    PeriodAccessionYear,
    MissingCulture,

    LearnerByzantineEleventhCentury,
    LearnerUniqueCultures,
    LearnerArchaicPeriod,
    LearnerTitlesByAccessionYear,
    LearnerArtifactsPerDepartment,
}

impl CannedQuery {
    /// Menu order: primary queries 1-25, then learner queries L1-L5.
    pub const ALL: [CannedQuery; 30] = [
        Self::ByzantineEleventhCentury,
        Self::UniqueCultures,
        Self::ArchaicPeriod,
        Self::TitlesByAccessionYear,
        Self::ArtifactsPerDepartment,
        Self::MoreThanOneImage,
        Self::AverageRank,
        Self::ColorcountAboveMediacount,
        Self::CreatedBetween1500And1600,
        Self::WithoutMediaFiles,
        Self::DistinctHues,
        Self::TopFiveColors,
        Self::AverageCoverageByHue,
        Self::ColorsOfArtifact,
        Self::TotalColorEntries,
        Self::ByzantineTitlesAndHues,
        Self::TitlesWithHues,
        Self::RanksWherePeriodKnown,
        Self::TopRankedGreyArtifacts,
        Self::ClassificationMediaAverage,
        Self::TopFiveDepartments,
        Self::AverageColorCountPerCulture,
        Self::MediaWithoutColor,
        Self::PeriodAccessionYear,
        Self::MissingCulture,
        Self::LearnerByzantineEleventhCentury,
        Self::LearnerUniqueCultures,
        Self::LearnerArchaicPeriod,
        Self::LearnerTitlesByAccessionYear,
        Self::LearnerArtifactsPerDepartment,
    ];

    pub fn group(self) -> QueryGroup {
        match self {
            Self::LearnerByzantineEleventhCentury
            | Self::LearnerUniqueCultures
            | Self::LearnerArchaicPeriod
            | Self::LearnerTitlesByAccessionYear
            | Self::LearnerArtifactsPerDepartment => QueryGroup::Learner,
            _ => QueryGroup::Primary,
        }
    }

    /// Position within its group, starting at 1.
    pub fn number(self) -> usize {
        let group = self.group();
        Self::ALL
            .iter()
            .filter(|q| q.group() == group)
            .position(|q| *q == self)
            .map(|idx| idx + 1)
            .unwrap_or(0)
    }

    /// Menu key as typed on the command line: `7` or `L2`.
    pub fn key(self) -> String {
        match self.group() {
            QueryGroup::Primary => self.number().to_string(),
            QueryGroup::Learner => format!("L{}", self.number()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ByzantineEleventhCentury => {
                "List all artifacts from the 11th century belonging to Byzantine culture"
            }
            Self::UniqueCultures => "Unique cultures represented in the artifacts",
            Self::ArchaicPeriod => "List all artifacts from the Archaic Period",
            Self::TitlesByAccessionYear => {
                "List artifact titles ordered by accession year in descending order"
            }
            Self::ArtifactsPerDepartment => "How many artifacts are there per department",
            Self::MoreThanOneImage => "Which artifacts have more than 1 image",
            Self::AverageRank => "What is the average rank of all artifacts",
            Self::ColorcountAboveMediacount => {
                "Which artifacts have a higher colorcount than mediacount"
            }
            Self::CreatedBetween1500And1600 => "List all artifacts created between 1500 and 1600",
            Self::WithoutMediaFiles => "How many artifacts have no media files",
            Self::DistinctHues => "What are all the distinct hues used in the dataset",
            Self::TopFiveColors => "What are the top 5 most used colors by frequency",
            Self::AverageCoverageByHue => "What is the average coverage percentage for each hue",
            Self::ColorsOfArtifact => "List all colors used for artifact 227994",
            Self::TotalColorEntries => "What is the total number of color entries in the dataset",
            Self::ByzantineTitlesAndHues => {
                "List artifact titles and hues for all artifacts belonging to the Byzantine culture"
            }
            Self::TitlesWithHues => "List each artifact title with its associated hues",
            Self::RanksWherePeriodKnown => {
                "Get artifact titles, cultures, and media ranks where the period is not null"
            }
            Self::TopRankedGreyArtifacts => {
                "Find artifact titles ranked in the top 10 that include the color hue Grey"
            }
            Self::ClassificationMediaAverage => {
                "How many artifacts exist per classification, and what is the average media count for each"
            }
            Self::TopFiveDepartments => "Top 5 departments with the most artifacts",
            Self::AverageColorCountPerCulture => "Average color count per culture",
            Self::MediaWithoutColor => "Artifacts with media but no color",
            Self::PeriodAccessionYear => "Artifacts per period and average accession year",
            Self::MissingCulture => "Artifacts missing culture information",

            Self::LearnerByzantineEleventhCentury => {
                "Artifacts from the 11th century (Byzantine culture)"
            }
            Self::LearnerUniqueCultures => "Unique cultures represented in artifacts",
            Self::LearnerArchaicPeriod => "Artifacts from the Archaic Period",
            Self::LearnerTitlesByAccessionYear => "Artifact titles ordered by accession year (DESC)",
            Self::LearnerArtifactsPerDepartment => "Artifacts count per department",
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            Self::ByzantineEleventhCentury => {
                "SELECT * FROM artifacts_metadata
                 WHERE century = '11th century' AND culture = 'Byzantine'"
            }
            Self::UniqueCultures => {
                "SELECT DISTINCT culture FROM artifacts_metadata
                 WHERE culture IS NOT NULL"
            }
            Self::ArchaicPeriod => "SELECT * FROM artifacts_metadata WHERE period = 'Archaic'",
            Self::TitlesByAccessionYear => {
                "SELECT title, accessionyear FROM artifacts_metadata
                 ORDER BY accessionyear DESC"
            }
            Self::ArtifactsPerDepartment => {
                "SELECT department, COUNT(*) AS total_artifacts FROM artifacts_metadata
                 GROUP BY department"
            }
            Self::MoreThanOneImage => {
                "SELECT objectid, imagecount FROM artifacts_media_1 WHERE imagecount > 1"
            }
            Self::AverageRank => "SELECT AVG(ranknum) AS average_ranknum FROM artifacts_media_1",
            Self::ColorcountAboveMediacount => {
                "SELECT objectid, colorcount, mediacount FROM artifacts_media_1
                 WHERE colorcount > mediacount"
            }
            Self::CreatedBetween1500And1600 => {
                "SELECT * FROM artifacts_media_1 WHERE datebegin BETWEEN 1500 AND 1600"
            }
            Self::WithoutMediaFiles => {
                "SELECT COUNT(*) AS artifacts_without_media FROM artifacts_media_1
                 WHERE mediacount = 0"
            }
            Self::DistinctHues => "SELECT DISTINCT hue FROM artifact_colors",
            Self::TopFiveColors => {
                "SELECT color, COUNT(*) AS color_count FROM artifact_colors
                 GROUP BY color ORDER BY color_count DESC LIMIT 5"
            }
            Self::AverageCoverageByHue => {
                "SELECT hue, AVG(percent) AS average_percentage FROM artifact_colors
                 GROUP BY hue"
            }
            Self::ColorsOfArtifact => {
                "SELECT color, spectrum, hue, percent, css3 FROM artifact_colors
                 WHERE objectid = 227994"
            }
            Self::TotalColorEntries => {
                "SELECT COUNT(*) AS total_color_entries FROM artifact_colors"
            }
            Self::ByzantineTitlesAndHues => {
                "SELECT am.title, ac.hue FROM artifacts_metadata am
                 JOIN artifact_colors ac ON am.id = ac.objectid
                 WHERE am.culture = 'Byzantine'"
            }
            Self::TitlesWithHues => {
                "SELECT am.title, ac.hue FROM artifacts_metadata am
                 JOIN artifact_colors ac ON am.id = ac.objectid"
            }
            Self::RanksWherePeriodKnown => {
                "SELECT am.title, am.culture, me.ranknum FROM artifacts_metadata am
                 JOIN artifacts_media_1 me ON am.id = me.objectid
                 WHERE am.period IS NOT NULL"
            }
            Self::TopRankedGreyArtifacts => {
                "SELECT am.title, me.ranknum, ac.hue FROM artifacts_metadata am
                 JOIN artifacts_media_1 me ON am.id = me.objectid
                 JOIN artifact_colors ac ON am.id = ac.objectid
                 WHERE ac.hue = 'Grey'
                 ORDER BY me.ranknum ASC LIMIT 10"
            }
            Self::ClassificationMediaAverage => {
                "SELECT am.classification, COUNT(am.id) AS artifact_count,
                        AVG(me.mediacount) AS average_mediacount
                 FROM artifacts_metadata am
                 JOIN artifacts_media_1 me ON am.id = me.objectid
                 GROUP BY am.classification ORDER BY artifact_count DESC"
            }
            Self::TopFiveDepartments => {
                "SELECT department, COUNT(*) AS total_artifacts FROM artifacts_metadata
                 GROUP BY department ORDER BY total_artifacts DESC LIMIT 5"
            }
            Self::AverageColorCountPerCulture => {
                "SELECT m.culture, AVG(me.colorcount) AS average_colorcount
                 FROM artifacts_metadata m
                 JOIN artifacts_media_1 me ON m.id = me.objectid
                 GROUP BY m.culture ORDER BY average_colorcount DESC"
            }
            Self::MediaWithoutColor => {
                "SELECT m.id, m.title FROM artifacts_metadata m
                 LEFT JOIN artifacts_media_1 me ON m.id = me.objectid
                 LEFT JOIN artifact_colors c ON m.id = c.objectid
                 WHERE me.objectid IS NOT NULL AND c.objectid IS NULL"
            }
            Self::PeriodAccessionYear => {
                "SELECT period, COUNT(*) AS total, AVG(accessionyear) AS avg_accession_year
                 FROM artifacts_metadata GROUP BY period"
            }
            Self::MissingCulture => {
                "SELECT id, title FROM artifacts_metadata
                 WHERE culture IS NULL OR culture = ''"
            }

            Self::LearnerByzantineEleventhCentury => {
                "SELECT * FROM artifacts_metadata
                 WHERE century = '11th century' AND culture = 'Byzantine'"
            }
            Self::LearnerUniqueCultures => {
                "SELECT DISTINCT culture FROM artifacts_metadata WHERE culture IS NOT NULL"
            }
            Self::LearnerArchaicPeriod => {
                "SELECT * FROM artifacts_metadata WHERE period = 'Archaic Period'"
            }
            Self::LearnerTitlesByAccessionYear => {
                "SELECT title, accessionyear FROM artifacts_metadata ORDER BY accessionyear DESC"
            }
            Self::LearnerArtifactsPerDepartment => {
                "SELECT department, COUNT(*) AS artifact_count FROM artifacts_metadata
                 GROUP BY department ORDER BY artifact_count DESC"
            }
        }
    }

    /// File stem for exported results, e.g. `2_Unique_cultures_represented_in_the_artifacts`.
    pub fn export_stem(self) -> String {
        format!("{} {}", self.key(), self.label())
    }
}

impl fmt::Display for CannedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.key(), self.label())
    }
}

impl FromStr for CannedQuery {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        let (group, digits) = match key.strip_prefix(['L', 'l']) {
            Some(rest) => (QueryGroup::Learner, rest),
            None => (QueryGroup::Primary, key),
        };

        let number: usize = digits
            .parse()
            .map_err(|_| QueryError::UnknownQuery(key.to_string()))?;

        Self::ALL
            .iter()
            .copied()
            .find(|q| q.group() == group && q.number() == number)
            .ok_or_else(|| QueryError::UnknownQuery(key.to_string()))
    }
}
