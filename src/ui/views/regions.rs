use bucketship::RegionConfig;

use crate::ui::widgets::table::Table;

pub fn render_regions(regions: &[RegionConfig], default_id: &str, supports_color: bool) -> String {
    let mut table = Table::new(["ID", "ENDPOINT", "DESCRIPTION"]);
    for region in regions {
        let id = if region.id() == default_id {
            format!("{} *", region.id())
        } else {
            region.id().to_string()
        };
        table.add_row([id, region.endpoint().to_string(), region.description().to_string()]);
    }
    let mut out = table.render(supports_color);
    out.push_str("\n* default region\n");
    out
}
