use crate::api::RawArtifactRecord;
use crate::ingest::rows::{ColorRow, MediaRow, MetadataRow};

/// The three flat tables derived from one batch of raw records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitTables {
    pub metadata: Vec<MetadataRow>,
    pub media: Vec<MediaRow>,
    pub colors: Vec<ColorRow>,
}

/// Flatten raw records into metadata, media and color rows, preserving
/// source order. Absent fields stay `None`.
pub fn split_records(records: &[RawArtifactRecord]) -> SplitTables {
    let mut tables = SplitTables {
        metadata: Vec::with_capacity(records.len()),
        media: Vec::with_capacity(records.len()),
        colors: Vec::new(),
    };

    for record in records {
        tables.metadata.push(MetadataRow {
            id: record.id,
            title: record.title.clone(),
            culture: record.culture.clone(),
            period: record.period.clone(),
            century: record.century.clone(),
            medium: record.medium.clone(),
            dimensions: record.dimensions.clone(),
            description: record.description.clone(),
            department: record.department.clone(),
            classification: record.classification.clone(),
            accessionyear: record.accessionyear,
            accessionmethod: record.accessionmethod.clone(),
        });

        tables.media.push(MediaRow {
            objectid: record.id,
            imagecount: record.imagecount,
            mediacount: record.mediacount,
            colorcount: record.colorcount,
            ranknum: record.rank,
            datebegin: record.datebegin,
            dateend: record.dateend,
        });

        for color in record.colors.iter().flatten() {
            tables.colors.push(ColorRow {
                objectid: record.id,
                color: color.color.clone(),
                spectrum: color.spectrum.clone(),
                hue: color.hue.clone(),
                percent: color.percent,
                css3: color.css3.clone(),
            });
        }
    }

    tables
}
