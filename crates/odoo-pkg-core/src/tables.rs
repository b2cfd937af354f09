//! Static data tables: Odoo series and Python distribution names
//!
//! Base addons are the framework modules shipped with the `odoo` distribution
//! itself. Depending on them needs no extra requirement. Business applications
//! (sale, stock, account, ...) are packaged as addons and are not listed;
//! projects that rely on a bundled copy can extend the list through
//! `extra_base_addons` in the config file.

/// (series, core requirement, addon requirement range)
pub(crate) const SERIES: &[(&str, &str, &str)] = &[
    ("8.0", "odoo>=8.0a,<9.0a", ">=8.0a,<9.0a"),
    ("9.0", "odoo>=9.0a,<9.1a", ">=9.0a,<9.1a"),
];

pub(crate) const ODOO8_BASE_ADDONS: &[&str] = &[
    "auth_crypt",
    "auth_ldap",
    "auth_oauth",
    "auth_openid",
    "auth_signup",
    "base",
    "base_action_rule",
    "base_gengo",
    "base_geolocalize",
    "base_iban",
    "base_import",
    "base_report_designer",
    "base_setup",
    "base_vat",
    "board",
    "bus",
    "decimal_precision",
    "edi",
    "email_template",
    "fetchmail",
    "im_chat",
    "im_livechat",
    "mail",
    "portal",
    "report",
    "report_webkit",
    "resource",
    "share",
    "web",
    "web_api",
    "web_calendar",
    "web_diagram",
    "web_gantt",
    "web_graph",
    "web_kanban",
    "web_kanban_gauge",
    "web_kanban_sparkline",
    "web_linkedin",
    "web_tests",
    "web_view_editor",
];

pub(crate) const ODOO9_BASE_ADDONS: &[&str] = &[
    "auth_crypt",
    "auth_ldap",
    "auth_oauth",
    "auth_signup",
    "barcodes",
    "base",
    "base_action_rule",
    "base_geolocalize",
    "base_iban",
    "base_import",
    "base_setup",
    "base_vat",
    "board",
    "bus",
    "decimal_precision",
    "fetchmail",
    "mail",
    "portal",
    "rating",
    "report",
    "resource",
    "utm",
    "web",
    "web_calendar",
    "web_diagram",
    "web_editor",
    "web_kanban",
    "web_kanban_gauge",
    "web_planner",
    "web_settings_dashboard",
    "web_tip",
    "web_view_editor",
];

/// Base addons of a series listed in `SERIES`
pub(crate) fn base_addons(series: &str) -> &'static [&'static str] {
    match series {
        "8.0" => ODOO8_BASE_ADDONS,
        "9.0" => ODOO9_BASE_ADDONS,
        _ => &[],
    }
}

/// Python module names used in `external_dependencies` mapped to the
/// distribution that provides them on PyPI
pub(crate) const EXTERNAL_DEPENDENCIES: &[(&str, &str)] = &[
    ("Asterisk", "py-Asterisk"),
    ("coda", "pycoda"),
    ("Crypto", "pycrypto"),
    ("cups", "pycups"),
    ("dateutil", "python-dateutil"),
    ("git", "GitPython"),
    ("ldap", "python-ldap"),
    ("magic", "python-magic"),
    ("mygengo", "gengo"),
    ("MySQLdb", "MySQL-python"),
    ("openid", "python-openid"),
    ("OpenSSL", "pyOpenSSL"),
    ("past", "future"),
    ("PIL", "Pillow"),
    ("serial", "pyserial"),
    ("stdnum", "python-stdnum"),
    ("u2flib_server", "python-u2flib-server"),
    ("unidecode", "Unidecode"),
    ("usb", "pyusb"),
    ("yaml", "PyYAML"),
];
