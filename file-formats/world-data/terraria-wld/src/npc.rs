//! Town NPC and mob records.
//!
//! Both lists are written as `bool`-terminated sequences: a `true` byte
//! precedes each record and a `false` byte ends the list.

use crate::error::Result;
use crate::stream::BinaryStream;
use crate::version::{FormatVersion, VERSION_140};

/// A town NPC.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Npc {
    /// Internal type name, e.g. `"Guide"`
    pub name: String,
    /// Name shown in game
    pub display_name: String,
    /// Position in world pixels
    pub position: (f32, f32),
    /// Whether the NPC has no house
    pub homeless: bool,
    /// Home tile
    pub home: (i32, i32),
}

/// A persisted non-town creature (version 140 and later).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mob {
    /// Internal type name
    pub name: String,
    /// Position in world pixels
    pub position: (f32, f32),
}

pub(crate) fn read_npcs(stream: &mut BinaryStream, version: FormatVersion) -> Result<(Vec<Npc>, Vec<Mob>)> {
    let mut npcs = Vec::new();
    while stream.read_bool()? {
        let name = stream.read_string()?;
        let display_name = stream.read_string()?;
        let position = (stream.read_f32()?, stream.read_f32()?);
        let homeless = stream.read_bool()?;
        let home = (stream.read_i32()?, stream.read_i32()?);
        npcs.push(Npc {
            name,
            display_name,
            position,
            homeless,
            home,
        });
    }

    let mut mobs = Vec::new();
    if version.includes(VERSION_140) {
        while stream.read_bool()? {
            let name = stream.read_string()?;
            let position = (stream.read_f32()?, stream.read_f32()?);
            mobs.push(Mob { name, position });
        }
    }
    Ok((npcs, mobs))
}

pub(crate) fn write_npcs(
    stream: &mut BinaryStream,
    version: FormatVersion,
    npcs: &[Npc],
    mobs: &[Mob],
) -> Result<()> {
    for npc in npcs {
        stream.write_bool(true)?;
        stream.write_string(&npc.name)?;
        stream.write_string(&npc.display_name)?;
        stream.write_f32(npc.position.0)?;
        stream.write_f32(npc.position.1)?;
        stream.write_bool(npc.homeless)?;
        stream.write_i32(npc.home.0)?;
        stream.write_i32(npc.home.1)?;
    }
    stream.write_bool(false)?;

    if version.includes(VERSION_140) {
        for mob in mobs {
            stream.write_bool(true)?;
            stream.write_string(&mob.name)?;
            stream.write_f32(mob.position.0)?;
            stream.write_f32(mob.position.1)?;
        }
        stream.write_bool(false)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn guide() -> Npc {
        Npc {
            name: "Guide".to_string(),
            display_name: "Andrew".to_string(),
            position: (33_600.0, 6_400.5),
            homeless: true,
            home: (2100, 400),
        }
    }

    #[test]
    fn test_round_trip_with_mobs() {
        let npcs = vec![guide()];
        let mobs = vec![Mob {
            name: "Bunny".to_string(),
            position: (10.0, 20.0),
        }];

        let mut stream = BinaryStream::new();
        write_npcs(&mut stream, FormatVersion(147), &npcs, &mobs).unwrap();
        stream.seek(0).unwrap();
        assert_eq!(read_npcs(&mut stream, FormatVersion(147)).unwrap(), (npcs, mobs));
    }

    #[test]
    fn test_legacy_version_has_no_mob_list() {
        let mut stream = BinaryStream::new();
        write_npcs(&mut stream, FormatVersion(120), &[], &[]).unwrap();
        assert_eq!(stream.as_bytes(), &[0]);

        let mut stream = BinaryStream::new();
        write_npcs(&mut stream, FormatVersion(140), &[], &[]).unwrap();
        assert_eq!(stream.as_bytes(), &[0, 0]);
    }
}
