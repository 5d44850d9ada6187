pub(crate) const CREATE_STATEMENTS: [&str; 5] = [
    "
    create table if not exists audio_artists (
        _id integer primary key,
        artist text,
        artist_key text,
        number_of_tracks integer not null default 0,
        number_of_albums integer not null default 0
    )
    ",
    "
    create table if not exists audio_albums (
        _id integer primary key,
        album text,
        album_key text,
        artist text,
        album_art text
    )
    ",
    "
    create table if not exists audio_media (
        _id integer primary key,
        title text,
        artist_id integer,
        artist text,
        album_id integer,
        genre_name text
    )
    ",
    "create index if not exists audio_albums_artist on audio_albums(artist)",
    "create index if not exists audio_media_genre on audio_media(genre_name)",
];

/// Sort key for a display name: case folded, with a leading article dropped.
pub fn name_key(name: &str) -> String {
    let folded = name.trim().to_lowercase();
    ["the ", "an ", "a "]
        .iter()
        .find_map(|article| folded.strip_prefix(article))
        .map(|rest| rest.trim_start().to_string())
        .unwrap_or(folded)
}
