//! Built-in demo seed data.
//!
//! Two tanks and three users, loaded at startup when `seed.demo_data` is
//! enabled. Nothing here is ever written back to disk.

use tankmon_types::{
    Channel, ChannelId, ChartType, ChartWidgetConfig, FieldSpec, TimeRange, User, Widget,
    WidgetConfig, WidgetId,
};

/// The built-in demo channels
pub fn seed_channels() -> Vec<Channel> {
    vec![
        Channel {
            id: ChannelId(1),
            name: "Tank_001".to_string(),
            fields: vec![
                FieldSpec::numeric("temperature", 23.5),
                FieldSpec::numeric("pressure", 1.2),
                FieldSpec::numeric("level", 85.3),
            ],
            widgets: vec![Widget::new(
                WidgetId(1),
                WidgetConfig::Chart(ChartWidgetConfig {
                    chart_type: ChartType::Line,
                    field: "temperature".to_string(),
                    time_range: TimeRange::Day,
                    title: "Temperature Over Time".to_string(),
                    ..Default::default()
                }),
            )],
            api_key: "key_tank001_xyz789".to_string(),
            last_update: "2024-06-12 14:30:22".to_string(),
            assigned_users: vec!["operator1@example.com".to_string()],
        },
        Channel {
            id: ChannelId(2),
            name: "Tank_002".to_string(),
            fields: vec![
                FieldSpec::numeric("temperature", 25.1),
                FieldSpec::numeric("humidity", 62.8),
                FieldSpec::numeric("ph", 7.2),
            ],
            widgets: Vec::new(),
            api_key: "key_tank002_abc456".to_string(),
            last_update: "2024-06-12 14:29:45".to_string(),
            assigned_users: Vec::new(),
        },
    ]
}

/// The built-in demo users
pub fn seed_users() -> Vec<User> {
    vec![
        User {
            username: "operator1".to_string(),
            email: "operator1@example.com".to_string(),
            verified: true,
            approved: true,
            assigned_dashboards: vec!["Tank_001".to_string()],
        },
        User {
            username: "technician2".to_string(),
            email: "tech2@example.com".to_string(),
            verified: true,
            approved: false,
            assigned_dashboards: Vec::new(),
        },
        User {
            username: "supervisor3".to_string(),
            email: "super3@example.com".to_string(),
            verified: false,
            approved: false,
            assigned_dashboards: Vec::new(),
        },
    ]
}
