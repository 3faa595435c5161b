use crate::Database;
use anyhow::Result;
use tracing::info;
use uuid::Uuid;

struct SeedEvent {
    title: &'static str,
    location: &'static str,
    date: &'static str,
    artists: &'static str,
    genre: &'static str,
    ticket_url: &'static str,
    source: &'static str,
}

const EVENTS: &[SeedEvent] = &[
    // Zagreb
    SeedEvent { title: "Lollipop Presents Black Eyed Peas @ Bundek Lake, Zagreb", location: "Zagreb", date: "2026-06-26", artists: "DJ", genre: "Pop", ticket_url: "https://entrio.hr", source: "entrio.hr" },
    SeedEvent { title: "K-Pop Forever @ Arena Zagreb", location: "Zagreb", date: "2026-03-20", artists: "K-Pop Forever", genre: "Pop", ticket_url: "https://eventim.hr", source: "eventim.hr" },
    SeedEvent { title: "STING 3.0 @ Arena Zagreb", location: "Zagreb", date: "2026-06-17", artists: "Sting", genre: "Rock, Jazz, Reggae, Classical", ticket_url: "https://eventim.hr", source: "eventim.hr" },
    SeedEvent { title: "Eros Ramazzotti @ Arena Zagreb", location: "Zagreb", date: "2026-04-28", artists: "Eros Ramazzotti", genre: "Classical", ticket_url: "https://eventim.hr", source: "eventim.hr" },
    SeedEvent { title: "Andre Rieu & Johann Strauss Orchestra @ Arena Zagreb", location: "Zagreb", date: "2026-11-20", artists: "Andre Rieu & Johann Strauss Orchestra", genre: "Classical", ticket_url: "https://eventim.hr", source: "eventim.hr" },
    SeedEvent { title: "Ana Bekuta @ Arena Zagreb", location: "Zagreb", date: "2026-02-14", artists: "Ana Bekuta", genre: "Folk", ticket_url: "https://eventim.hr", source: "eventim.hr" },
    SeedEvent { title: "Hari Mata Hari @ Arena Zagreb", location: "Zagreb", date: "2026-03-14", artists: "Hari Mata Hari", genre: "Pop, Rock", ticket_url: "https://eventim.hr", source: "eventim.hr" },
    SeedEvent { title: "Marilyn Manson @ Arena Zagreb", location: "Zagreb", date: "2026-07-16", artists: "Marilyn Manson", genre: "Rock", ticket_url: "https://eventim.hr", source: "eventim.hr" },
    SeedEvent { title: "Jala Brat & Buba Corelli @ Arena Zagreb", location: "Zagreb", date: "2026-05-09", artists: "Jala Brat & Buba Corelli", genre: "Turbofolk", ticket_url: "https://eventim.hr", source: "eventim.hr" },
    SeedEvent { title: "The Music Of Hans Zimmer & Others @ Mozaik Event Centar", location: "Zagreb", date: "2026-05-03", artists: "Hans Zimmer", genre: "Classical", ticket_url: "https://eventim.hr", source: "eventim.hr" },
    SeedEvent { title: "Six Feet Under @ Boogaloo Club", location: "Zagreb", date: "2026-06-09", artists: "Six Feet Under", genre: "Metal", ticket_url: "https://eventim.hr", source: "eventim.hr" },
    SeedEvent { title: "Zebrahead @ Boogaloo Club", location: "Zagreb", date: "2026-02-13", artists: "Zebrahead", genre: "Pop, Rock", ticket_url: "https://eventim.hr", source: "eventim.hr" },
    SeedEvent { title: "Crvena Jabuka @ Boogaloo Club", location: "Zagreb", date: "2026-03-28", artists: "Crvena Jabuka", genre: "Pop", ticket_url: "https://entrio.hr", source: "entrio.hr" },
    // Split
    SeedEvent { title: "Ultra Europe Festival 2026 @ Park Mladeži", location: "Split", date: "2026-07-10", artists: "Martin Garrix, David Guetta, Amelie Lens, Calvin Harris", genre: "Electronic", ticket_url: "https://entrio.hr", source: "entrio.hr" },
    SeedEvent { title: "Dražen Zečić - koncert za valentinovo @ Porat Club", location: "Split", date: "2026-02-14", artists: "Dražen Zečić", genre: "Pop", ticket_url: "https://adriaticket.com", source: "adriaticket.com" },
    SeedEvent { title: "Brain Holidays / Rođendan Boba Marleya @ Dom mladih", location: "Split", date: "2026-02-07", artists: "Brain Holidays", genre: "Reggae", ticket_url: "https://adriaticket.com", source: "adriaticket.com" },
    SeedEvent { title: "Boban Rajović @ Dvorana Gripe", location: "Split", date: "2026-02-28", artists: "Boban Rajović", genre: "Turbofolk", ticket_url: "https://eventim.hr", source: "eventim.hr" },
    SeedEvent { title: "Uršula & Black Coffee @ Dvorana Lora", location: "Split", date: "2026-02-19", artists: "Uršula & Black Coffee", genre: "Jazz, Soul, Funk", ticket_url: "https://entrio.hr", source: "entrio.hr" },
    SeedEvent { title: "Fiesta Latina Cabaret Dinner Show @ Level restaurant Split", location: "Split", date: "2026-05-23", artists: "Fiesta Latina", genre: "Latino", ticket_url: "https://entrio.hr", source: "entrio.hr" },
    SeedEvent { title: "Zabranjeno pušenje kao Neuštekani! @ Dvorana Lora", location: "Split", date: "2026-03-21", artists: "Zabranjeno pušenje", genre: "Pop, Rock", ticket_url: "https://entrio.hr", source: "entrio.hr" },
    // Rijeka
    SeedEvent { title: "Paraf @ Pogon Kulture", location: "Rijeka", date: "2026-04-17", artists: "Paraf", genre: "Indie", ticket_url: "https://eventim.hr", source: "eventim.hr" },
    SeedEvent { title: "Josipa Lisac @ Hrvatski kulturni dom na Sušaku", location: "Rijeka", date: "2026-03-07", artists: "Josipa Lisac", genre: "Pop", ticket_url: "https://entrio.hr", source: "entrio.hr" },
    // Dubrovnik
    SeedEvent { title: "Dubrovnik Summer Festival", location: "Dubrovnik", date: "2026-07-10", artists: "Dubrovnik Symphony Orchestra", genre: "Classical", ticket_url: "https://entrio.hr", source: "entrio.hr" },
    // Zadar
    SeedEvent { title: "Sunset Sessions Pozdrav Suncu", location: "Zadar", date: "2026-08-22", artists: "Local DJs", genre: "Electronic", ticket_url: "https://entrio.hr", source: "entrio.hr" },
    SeedEvent { title: "Parni Valjak @ Arsenal Zadar", location: "Zadar", date: "2026-02-14", artists: "Parni Valjak", genre: "Pop, Rock", ticket_url: "https://eventim.hr", source: "eventim.hr" },
    // Šibenik
    SeedEvent { title: "Elemental @ Azimut Šibenik", location: "Šibenik", date: "2026-02-06", artists: "Elemental", genre: "Hip-hop", ticket_url: "https://eventim.hr", source: "eventim.hr" },
    SeedEvent { title: "Chet Faker @ Tvrđava Sv. Mihovila Šibenik", location: "Šibenik", date: "2026-07-28", artists: "Chet Faker", genre: "Indie", ticket_url: "https://eventim.hr", source: "eventim.hr" },
    SeedEvent { title: "Robert Plant @ Tvrđava Sv. Mihovila Šibenik", location: "Šibenik", date: "2026-06-20", artists: "Robert Plant", genre: "Rock", ticket_url: "https://eventim.hr", source: "eventim.hr" },
    // Pula
    SeedEvent { title: "STING 3.0 @ Arena Pula", location: "Pula", date: "2026-08-01", artists: "Sting", genre: "Rock, Jazz, Reggae, Classical", ticket_url: "https://entrio.hr", source: "entrio.hr" },
    SeedEvent { title: "Jovanotti live @ Arena Pula", location: "Pula", date: "2026-07-03", artists: "Jovanotti", genre: "Rock", ticket_url: "https://entrio.hr", source: "entrio.hr" },
    // Varaždin
    SeedEvent { title: "Tomislav Bralić & Klapa Intrade @ Arena Varaždin", location: "Varaždin", date: "2026-03-07", artists: "Tomislav Bralić & Klapa Intrade", genre: "Klapa", ticket_url: "https://eventim.hr", source: "eventim.hr" },
    // Osijek
    SeedEvent { title: "Parni Valjak @ Dvorana Gradski Vrt", location: "Osijek", date: "2026-02-28", artists: "Parni Valjak", genre: "Pop, Rock", ticket_url: "https://eventim.hr", source: "eventim.hr" },
];

/// Seeds the event catalog once. An existing catalog is left untouched so
/// wishlist rows keep their targets.
pub fn run(db: &Database) -> Result<()> {
    let existing = db.count_events()?;
    if existing > 0 {
        info!("Events already seeded ({} rows), skipping", existing);
        return Ok(());
    }

    for event in EVENTS {
        let id = Uuid::new_v4().to_string();
        db.insert_event(
            &id,
            event.title,
            event.location,
            event.date,
            event.artists,
            event.genre,
            Some(event.ticket_url),
            Some(event.source),
        )?;
    }

    info!("Seeded {} events", EVENTS.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeding_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        run(&db).unwrap();
        let first = db.count_events().unwrap();
        assert_eq!(first, EVENTS.len() as i64);

        run(&db).unwrap();
        assert_eq!(db.count_events().unwrap(), first);
    }
}
