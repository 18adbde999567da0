//! Shared test fixtures: a miniature MovieSummaries dataset written to a
//! temporary directory in the same file layout the real archive extracts to.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Rows in the `movie.metadata.tsv` format (9 tab-separated columns; the
/// genre column is a Freebase id → name JSON map).
pub const MOVIE_METADATA: &str = concat!(
    "975900\t/m/03vyhn\tGhosts of Mars\t2001-08-24\t14010832\t98.0\t",
    "{\"/m/02h40lc\": \"English Language\"}\t{\"/m/09c7w0\": \"United States of America\"}\t",
    "{\"/m/01jfsb\": \"Thriller\", \"/m/06n90\": \"Science Fiction\", \"/m/03npn\": \"Horror\"}\n",
    "3196793\t/m/08yl5d\tGetting Away with Murder\t1996-04-12\t\t95.0\t",
    "{\"/m/02h40lc\": \"English Language\"}\t{\"/m/09c7w0\": \"United States of America\"}\t",
    "{\"/m/05p553\": \"Comedy film\"}\n",
    "261236\t/m/01mrr1\tWhite on Rice\t2009\t\t82.0\t",
    "{\"/m/02h40lc\": \"English Language\"}\t{\"/m/09c7w0\": \"United States of America\"}\t",
    "{\"/m/05p553\": \"Comedy film\", \"/m/02l7c8\": \"Romance Film\"}\n",
);

/// Rows in the `character.metadata.tsv` format (13 tab-separated columns).
pub const CHARACTER_METADATA: &str = concat!(
    "975900\t/m/03vyhn\t2001-08-24\tAkooshay\t1958-08-26\tF\t1.62\t\tWanda De Jesus\t42\t/m/0bgchxw\t/m/0bgcj3x\t/m/03wcfv7\n",
    "975900\t/m/03vyhn\t2001-08-24\tLt. Melanie Ballard\t1975-10-05\tF\t1.78\t\tNatasha Henstridge\t25\t/m/0jys3m\t/m/0bgchn4\t/m/0346l4\n",
    "975900\t/m/03vyhn\t2001-08-24\tDesolation Williams\t1969-06-15\tM\t1.727\t/m/064b9t\tIce Cube\t32\t/m/0jys3g\t/m/0bgchn_\t/m/01vw26l\n",
    "3196793\t/m/08yl5d\t1996-04-12\t\t1958-01-26\tF\t\t\tEllen DeGeneres\t38\t/m/0bgcj6h\t\t/m/0157m\n",
);

/// Rows in the `plot_summaries.txt` format.
pub const PLOT_SUMMARIES: &str = concat!(
    "975900\tSet in the second half of the 22nd century, a Martian mining colony ",
    "is overrun and a police squad must fight its way out.\n",
    "3196793\tAn uptight professor believes his neighbor is a notorious killer ",
    "and sets out to deliver his own justice, with comic results.\n",
);

/// Write the fixture dataset into `dir` and return the dataset path.
pub fn write_dataset(dir: &Path) -> PathBuf {
    fs::create_dir_all(dir).expect("create fixture dir");
    fs::write(dir.join("movie.metadata.tsv"), MOVIE_METADATA).expect("write movie metadata");
    fs::write(dir.join("character.metadata.tsv"), CHARACTER_METADATA)
        .expect("write character metadata");
    fs::write(dir.join("plot_summaries.txt"), PLOT_SUMMARIES).expect("write plot summaries");
    dir.to_path_buf()
}

/// The illustrative scenario from the project brief.
pub const ASTEROID_DESCRIPTION: &str =
    "A group of astronauts must stop an asteroid from destroying Earth.";
