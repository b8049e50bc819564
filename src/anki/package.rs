use std::{
    fs::{
        self,
        File,
    },
    io::{
        BufWriter,
        Write,
    },
    path::{
        Path,
        PathBuf,
    },
};

use chrono::Utc;
use rusqlite::{
    params,
    Connection,
};
use serde_json::{
    json,
    Value,
};
use zip::{
    write::SimpleFileOptions,
    CompressionMethod,
    ZipWriter,
};

use crate::{
    anki::{
        ids::field_checksum,
        types::{
            CardTemplate,
            Deck,
            Model,
        },
    },
    core::DaneoError,
};

// Anki collection schema version 11, as shipped inside every .apkg.
const SCHEMA_SQL: &str = r#"
CREATE TABLE col (
    id integer primary key,
    crt integer not null,
    mod integer not null,
    scm integer not null,
    ver integer not null,
    dty integer not null,
    usn integer not null,
    ls integer not null,
    conf text not null,
    models text not null,
    decks text not null,
    dconf text not null,
    tags text not null
);
CREATE TABLE notes (
    id integer primary key,
    guid text not null,
    mid integer not null,
    mod integer not null,
    usn integer not null,
    tags text not null,
    flds text not null,
    sfld integer not null,
    csum integer not null,
    flags integer not null,
    data text not null
);
CREATE TABLE cards (
    id integer primary key,
    nid integer not null,
    did integer not null,
    ord integer not null,
    mod integer not null,
    usn integer not null,
    type integer not null,
    queue integer not null,
    due integer not null,
    ivl integer not null,
    factor integer not null,
    reps integer not null,
    lapses integer not null,
    left integer not null,
    odue integer not null,
    odid integer not null,
    flags integer not null,
    data text not null
);
CREATE TABLE revlog (
    id integer primary key,
    cid integer not null,
    usn integer not null,
    ease integer not null,
    ivl integer not null,
    lastIvl integer not null,
    factor integer not null,
    time integer not null,
    type integer not null
);
CREATE TABLE graves (
    usn integer not null,
    oid integer not null,
    type integer not null
);
CREATE INDEX ix_notes_usn on notes (usn);
CREATE INDEX ix_cards_usn on cards (usn);
CREATE INDEX ix_revlog_usn on revlog (usn);
CREATE INDEX ix_cards_nid on cards (nid);
CREATE INDEX ix_cards_sched on cards (did, queue, due);
CREATE INDEX ix_revlog_cid on revlog (cid);
CREATE INDEX ix_notes_csum on notes (csum);
"#;

/// Writes the model, deck, notes and media into a single `.apkg` zip at
/// `output`, overwriting unconditionally. Media files are stored under
/// zero-based index names with a `media` JSON manifest mapping them back
/// to their real filenames.
pub fn write_package(
    model: &Model,
    deck: &Deck,
    media_files: &[PathBuf],
    output: &Path,
) -> Result<(), DaneoError> {
    let db_path = collection_scratch_path(output);
    if db_path.exists() {
        fs::remove_file(&db_path)?;
    }

    let result = write_collection(&db_path, model, deck);
    let db_bytes = result.and_then(|_| Ok(fs::read(&db_path)?));
    let _ = fs::remove_file(&db_path);
    let db_bytes = db_bytes?;

    let file = File::create(output)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("collection.anki2", options)?;
    zip.write_all(&db_bytes)?;

    let mut manifest = serde_json::Map::new();
    for (index, path) in media_files.iter().enumerate() {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        zip.start_file(index.to_string(), options)?;
        zip.write_all(&fs::read(path)?)?;
        manifest.insert(index.to_string(), Value::String(name.to_string()));
    }

    zip.start_file("media", options)?;
    zip.write_all(Value::Object(manifest).to_string().as_bytes())?;
    zip.finish()?;

    Ok(())
}

fn collection_scratch_path(output: &Path) -> PathBuf {
    let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or("deck");
    output.with_file_name(format!(".{stem}.anki2.tmp"))
}

fn write_collection(db_path: &Path, model: &Model, deck: &Deck) -> Result<(), DaneoError> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch(SCHEMA_SQL)?;

    let now = Utc::now();
    let now_secs = now.timestamp();
    let now_millis = now.timestamp_millis();

    let models = json!({ model.id.to_string(): model_json(model, deck.id, now_secs) });
    let decks = json!({
        "1": default_deck_json(now_secs),
        deck.id.to_string(): deck_json(deck, now_secs),
    });

    conn.execute(
        "INSERT INTO col VALUES (1, ?1, ?2, ?3, 11, 0, 0, 0, ?4, ?5, ?6, ?7, '{}')",
        params![
            now_secs,
            now_millis,
            now_millis,
            conf_json(model.id).to_string(),
            models.to_string(),
            decks.to_string(),
            dconf_json().to_string(),
        ],
    )?;

    let mut note_stmt = conn.prepare(
        "INSERT INTO notes VALUES (?1, ?2, ?3, ?4, -1, '', ?5, ?6, ?7, 0, '')",
    )?;
    let mut card_stmt = conn.prepare(
        "INSERT INTO cards VALUES (?1, ?2, ?3, ?4, ?5, -1, 0, 0, ?6, 0, 0, 0, 0, 0, 0, 0, 0, '')",
    )?;

    let mut card_id = now_millis;
    for (index, note) in deck.notes.iter().enumerate() {
        let note_id = now_millis + index as i64;
        note_stmt.execute(params![
            note_id,
            note.guid(),
            model.id,
            now_secs,
            note.fields.join("\u{1f}"),
            note.sort_field(),
            field_checksum(note.sort_field()),
        ])?;

        for ord in 0..model.templates.len() {
            card_id += 1;
            card_stmt.execute(params![
                card_id,
                note_id,
                deck.id,
                ord as i64,
                now_secs,
                index as i64,
            ])?;
        }
    }

    Ok(())
}

fn model_json(model: &Model, deck_id: i64, now_secs: i64) -> Value {
    let fields: Vec<Value> = model
        .fields
        .iter()
        .enumerate()
        .map(|(ord, name)| {
            json!({
                "name": name,
                "ord": ord,
                "sticky": false,
                "rtl": false,
                "font": "Arial",
                "size": 20,
                "media": [],
            })
        })
        .collect();

    let templates: Vec<Value> = model
        .templates
        .iter()
        .enumerate()
        .map(|(ord, tmpl)| {
            json!({
                "name": tmpl.name,
                "ord": ord,
                "qfmt": tmpl.qfmt,
                "afmt": tmpl.afmt,
                "bqfmt": "",
                "bafmt": "",
                "did": Value::Null,
            })
        })
        .collect();

    let req: Vec<Value> = model
        .templates
        .iter()
        .enumerate()
        .map(|(ord, tmpl)| json!([ord, "any", question_field_ords(model, tmpl)]))
        .collect();

    json!({
        "id": model.id,
        "name": model.name,
        "type": 0,
        "mod": now_secs,
        "usn": -1,
        "sortf": 0,
        "did": deck_id,
        "flds": fields,
        "tmpls": templates,
        "css": model.css,
        "latexPre": "\\documentclass[12pt]{article}\n\\special{papersize=3in,5in}\n\\usepackage{amssymb,amsmath}\n\\pagestyle{empty}\n\\setlength{\\parindent}{0in}\n\\begin{document}\n",
        "latexPost": "\\end{document}",
        "req": req,
        "tags": [],
        "vers": [],
    })
}

/// Field ordinals referenced by a template's question side; Anki uses
/// these to decide whether a card is generated for a note.
fn question_field_ords(model: &Model, tmpl: &CardTemplate) -> Vec<usize> {
    model
        .fields
        .iter()
        .enumerate()
        .filter(|(_, name)| tmpl.qfmt.contains(&format!("{{{{{name}}}}}")))
        .map(|(ord, _)| ord)
        .collect()
}

fn deck_json(deck: &Deck, now_secs: i64) -> Value {
    json!({
        "id": deck.id,
        "name": deck.name,
        "desc": "",
        "mod": now_secs,
        "usn": -1,
        "collapsed": false,
        "browserCollapsed": false,
        "newToday": [0, 0],
        "revToday": [0, 0],
        "lrnToday": [0, 0],
        "timeToday": [0, 0],
        "dyn": 0,
        "extendNew": 0,
        "extendRev": 0,
        "conf": 1,
    })
}

fn default_deck_json(now_secs: i64) -> Value {
    json!({
        "id": 1,
        "name": "Default",
        "desc": "",
        "mod": now_secs,
        "usn": 0,
        "collapsed": false,
        "browserCollapsed": false,
        "newToday": [0, 0],
        "revToday": [0, 0],
        "lrnToday": [0, 0],
        "timeToday": [0, 0],
        "dyn": 0,
        "extendNew": 0,
        "extendRev": 0,
        "conf": 1,
    })
}

fn conf_json(model_id: i64) -> Value {
    json!({
        "activeDecks": [1],
        "curDeck": 1,
        "newSpread": 0,
        "collapseTime": 1200,
        "timeLim": 0,
        "estTimes": true,
        "dueCounts": true,
        "curModel": model_id.to_string(),
        "nextPos": 1,
        "sortType": "noteFld",
        "sortBackwards": false,
        "addToCur": true,
    })
}

fn dconf_json() -> Value {
    json!({
        "1": {
            "id": 1,
            "name": "Default",
            "replayq": true,
            "autoplay": true,
            "timer": 0,
            "maxTaken": 60,
            "mod": 0,
            "usn": 0,
            "new": {
                "bury": true,
                "delays": [1, 10],
                "initialFactor": 2500,
                "ints": [1, 4, 7],
                "order": 1,
                "perDay": 20,
                "separate": true,
            },
            "rev": {
                "bury": true,
                "ease4": 1.3,
                "fuzz": 0.05,
                "ivlFct": 1.0,
                "maxIvl": 36500,
                "minSpace": 1,
                "perDay": 100,
            },
            "lapse": {
                "delays": [10],
                "leechAction": 0,
                "leechFails": 8,
                "minInt": 1,
                "mult": 0.0,
            },
        }
    })
}
