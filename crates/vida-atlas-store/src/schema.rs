// SPDX-License-Identifier: Apache-2.0

/// One table of species documents. Flat columns for the reliably-typed
/// fields; the embedded JSON blob and the serialized locations string stay
/// TEXT, preserving the tolerant-schema storage contract. `moderation_state`
/// is NULL for legacy records, which count as approved when listing.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS species (
  id INTEGER PRIMARY KEY,
  scientific_name TEXT NOT NULL UNIQUE,
  common_name TEXT NOT NULL DEFAULT '',
  conservation_status TEXT,
  photos TEXT NOT NULL DEFAULT '[]',
  primary_photo TEXT,
  photo_1 TEXT,
  photo_2 TEXT,
  photo_3 TEXT,
  photo_4 TEXT,
  description TEXT NOT NULL DEFAULT '',
  kingdom TEXT,
  phylum TEXT,
  class TEXT,
  \"order\" TEXT,
  family TEXT,
  full_metadata TEXT,
  top_locations TEXT,
  taxon_sis_id INTEGER,
  inaturalist_id INTEGER,
  gbif_id INTEGER,
  contributor_id TEXT NOT NULL,
  moderation_state TEXT CHECK (moderation_state IN ('pending', 'approved', 'rejected')),
  created_at TEXT NOT NULL,
  updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_species_status ON species(conservation_status);
CREATE INDEX IF NOT EXISTS idx_species_state ON species(moderation_state);
CREATE INDEX IF NOT EXISTS idx_species_contributor ON species(contributor_id);
";
