use serde::Serialize;

/// A unit of a hospital site (ward, ICU, emergency room, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sector {
    pub id: String,
    pub name: String,
}

/// A hospital site with its embedded sectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Site {
    pub id: String,
    pub name: String,
    pub sectors: Vec<Sector>,
}

impl Site {
    pub fn sector(&self, sector_id: &str) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.id == sector_id)
    }
}

/// Find a site and one of its sectors in a registry snapshot.
pub fn find_site_sector<'a>(
    sites: &'a [Site],
    site_id: &str,
    sector_id: &str,
) -> (Option<&'a Site>, Option<&'a Sector>) {
    let site = sites.iter().find(|s| s.id == site_id);
    let sector = site.and_then(|s| s.sector(sector_id));
    (site, sector)
}
