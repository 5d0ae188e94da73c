pub const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS artifacts_metadata (
        id INTEGER PRIMARY KEY,
        title TEXT,
        culture TEXT,
        period TEXT,
        century TEXT,
        medium TEXT,
        dimensions TEXT,
        description TEXT,
        department TEXT,
        classification TEXT,
        accessionyear INTEGER,
        accessionmethod TEXT
    );

    CREATE TABLE IF NOT EXISTS artifacts_media_1 (
        objectid INTEGER,
        imagecount INTEGER,
        mediacount INTEGER,
        colorcount INTEGER,
        ranknum INTEGER,
        datebegin INTEGER,
        dateend INTEGER
    );

    CREATE TABLE IF NOT EXISTS artifact_colors (
        objectid INTEGER,
        color TEXT,
        spectrum TEXT,
        hue TEXT,
        percent REAL,
        css3 TEXT
    );
";

pub const METADATA_TABLE: &str = "artifacts_metadata";
pub const MEDIA_TABLE: &str = "artifacts_media_1";
pub const COLORS_TABLE: &str = "artifact_colors";
