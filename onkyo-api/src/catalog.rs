//! Static input-source and listening-mode tables of the receiver family.
//!
//! Codes are the two-hex-digit parameters of `SLI` and `LMD`. A few names appear under
//! more than one code on different models; name lookups return the last entry.

/// Input selector codes (`SLI`) and their display names.
pub const INPUT_SOURCES: &[(&str, &str)] = &[
    ("00", "VIDEO1"),
    ("01", "CBL/SAT"),
    ("02", "GAME"),
    ("03", "AUX"),
    ("04", "AUX2"),
    ("05", "PC"),
    ("06", "VIDEO6"),
    ("07", "VIDEO7"),
    ("10", "BD/DVD"),
    ("11", "STRM BOX"),
    ("12", "TV"),
    ("13", "TAPE1"),
    ("14", "TAPE2"),
    ("15", "VIDEO9"),
    ("16", "VIDEO10"),
    ("20", "PHONO"),
    ("21", "TV/CD"),
    ("22", "TUNER"),
    ("23", "CD"),
    ("24", "FM"),
    ("25", "AM"),
    ("26", "TUNER"),
    ("27", "MUSIC SERVER"),
    ("28", "INTERNET RADIO"),
    ("29", "USB FRONT"),
    ("2A", "USB REAR"),
    ("2B", "NETWORK"),
    ("2C", "USB TOGGLE"),
    ("2D", "BLUETOOTH"),
    ("2E", "AIRPLAY"),
    ("2F", "USB DAC"),
    ("30", "MULTI CH"),
    ("31", "XM"),
    ("32", "SIRIUS"),
    ("33", "DAB"),
    ("34", "WIDE FM"),
    ("35", "SOURCE"),
    ("40", "UNIVERSAL PORT"),
    ("41", "LINE"),
    ("42", "LINE2"),
    ("50", "HDMI1"),
    ("51", "HDMI2"),
    ("52", "HDMI3"),
    ("53", "HDMI4"),
    ("54", "HDMI5"),
    ("55", "HDMI6"),
    ("56", "HDMI7"),
    ("80", "SOURCE"),
];

/// Listening mode codes (`LMD`) and their display names.
pub const LISTENING_MODES: &[(&str, &str)] = &[
    ("00", "STEREO"),
    ("01", "DIRECT"),
    ("02", "SURROUND"),
    ("03", "FILM"),
    ("04", "THX"),
    ("05", "ACTION"),
    ("06", "MUSICAL"),
    ("07", "MONO MOVIE"),
    ("08", "ORCHESTRA"),
    ("09", "UNPLUGGED"),
    ("0A", "STUDIO-MIX"),
    ("0B", "TV LOGIC"),
    ("0C", "ALL CH STEREO"),
    ("0D", "THEATER-DIMENSIONAL"),
    ("0E", "ENHANCED"),
    ("0F", "MONO"),
    ("11", "PURE AUDIO"),
    ("12", "MULTIPLEX"),
    ("13", "FULL MONO"),
    ("14", "DOLBY VIRTUAL"),
    ("15", "DTS SURROUND SENSATION"),
    ("16", "AUDYSSEY DSX"),
    ("1F", "WHOLE HOUSE"),
    ("23", "STAGE"),
    ("25", "ACTION"),
    ("26", "MUSIC"),
    ("2E", "SPORTS"),
    ("40", "STRAIGHT DECODE"),
    ("41", "DOLBY EX/DTS ES"),
    ("42", "THX CINEMA"),
    ("43", "THX SURROUND EX"),
    ("44", "THX MUSIC"),
    ("45", "THX GAMES"),
    ("50", "THX U2/S2 CINEMA"),
    ("51", "THX MUSICMODE"),
    ("52", "THX GAMES MODE"),
    ("80", "PLII/PLIIx MOVIE"),
    ("81", "PLII/PLIIx MUSIC"),
    ("82", "NEO:6 CINEMA"),
    ("83", "NEO:6 MUSIC"),
    ("84", "PLII/PLIIx THX CINEMA"),
    ("85", "NEO:6 THX CINEMA"),
    ("86", "PLII/PLIIx GAME"),
    ("87", "NEURAL SURROUND"),
    ("88", "NEURAL THX"),
    ("89", "PLII THX GAMES"),
    ("8A", "NEO:6 THX GAMES"),
    ("8B", "PLII/PLIIx THX MUSIC"),
    ("8C", "NEO:6 THX MUSIC"),
    ("8D", "NEURAL THX CINEMA"),
    ("8E", "NEURAL THX MUSIC"),
    ("8F", "NEURAL THX GAMES"),
    ("90", "PLIIz HEIGHT"),
    ("91", "NEO:6 CINEMA DTS SURROUND SENSATION"),
    ("92", "NEO:6 MUSIC DTS SURROUND SENSATION"),
    ("93", "NEURAL DIGITAL MUSIC"),
    ("94", "PLIIz HEIGHT THX CINEMA"),
    ("95", "PLIIz HEIGHT THX MUSIC"),
    ("96", "PLIIz HEIGHT THX GAMES"),
    ("97", "PLIIz HEIGHT THX U2/S2 CINEMA"),
    ("98", "PLIIz HEIGHT THX MUSICMODE"),
    ("99", "PLIIz HEIGHT THX GAMES MODE"),
    ("9A", "NEO:X CINEMA"),
    ("9B", "NEO:X MUSIC"),
    ("9C", "NEO:X GAME"),
    ("A0", "PLIIx/PLII MOVIE + AUDYSSEY DSX"),
    ("A1", "PLIIx/PLII MUSIC + AUDYSSEY DSX"),
    ("A2", "PLIIx/PLII GAME + AUDYSSEY DSX"),
    ("A3", "NEO:6 CINEMA + AUDYSSEY DSX"),
    ("A4", "NEO:6 MUSIC + AUDYSSEY DSX"),
    ("A5", "NEURAL SURROUND + AUDYSSEY DSX"),
    ("A6", "NEURAL DIGITAL MUSIC + AUDYSSEY DSX"),
    ("A7", "DOLBY EX + AUDYSSEY DSX"),
    ("FF", "AUTO SURROUND"),
];

/// Display name for an `SLI` code.
pub fn input_name(code: &str) -> Option<&'static str> {
    name_for(INPUT_SOURCES, code)
}

/// `SLI` code for an input name, case-insensitive. Later codes win for shared names.
pub fn input_code(name: &str) -> Option<&'static str> {
    code_for(INPUT_SOURCES, name)
}

/// Display name for an `LMD` code.
pub fn listening_mode_name(code: &str) -> Option<&'static str> {
    name_for(LISTENING_MODES, code)
}

/// `LMD` code for a listening mode name, case-insensitive.
pub fn listening_mode_code(name: &str) -> Option<&'static str> {
    code_for(LISTENING_MODES, name)
}

fn name_for(table: &'static [(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(entry_code, _)| entry_code.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

fn code_for(table: &'static [(&'static str, &'static str)], name: &str) -> Option<&'static str> {
    table
        .iter()
        .rev()
        .find(|(_, entry_name)| entry_name.eq_ignore_ascii_case(name))
        .map(|(code, _)| *code)
}
