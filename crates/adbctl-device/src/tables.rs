use std::{collections::HashMap, sync::OnceLock};

pub struct FireOsModel {
    pub code: &'static str,
    pub name: &'static str,
    pub link: &'static str,
}

static CPU_ABIS: &[(&str, &str)] = &[
    ("armeabi", "ARM EABI (32-bit)"),
    (
        "armeabi-v7a",
        "ARM EABI v7a (32-bit, with hardware floating-point support)",
    ),
    ("arm64-v8a", "ARM 64-bit (v8a)"),
    ("x86", "Intel x86 (32-bit)"),
    ("x86_64", "Intel x86_64 (64-bit)"),
    ("mips", "MIPS (32-bit)"),
    ("mips64", "MIPS 64-bit"),
];

static PROPERTY_ICONS: &[(&str, &str)] = &[
    ("Model", "📱"),
    ("Manufacturer", "🏭"),
    ("Android Version", "🤖"),
    ("API Level", "🔢"),
    ("Build Number", "🏗️"),
    ("Fire OS Version", "🔥"),
    ("Fire OS Build Number", "🔥"),
    ("CPU", "💻"),
    ("CPU ABI", "🧮"),
    ("Memory", "💾"),
    ("Storage", "💽"),
    ("Screen Resolution", "📺"),
    ("Screen Density", "🔍"),
    ("Battery Level", "🔋"),
];

const NO_ICON: &str = "  ";

// Amazon device codes as reported by ro.product.model.
static FIRE_OS_MODELS: &[FireOsModel] = &[
    FireOsModel {
        code: "AFTTOR001",
        name: "Panasonic OLED TV VIERA with Fire TV integration (2024)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=panasonic_fire_tv_2024_jp",
    },
    FireOsModel {
        code: "AFTWYM01",
        name: "Panasonic OLED TV VIERA with Fire TV integration (2024)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=panasonic_fire_tv_2024_jp",
    },
    FireOsModel {
        code: "AFTGOLDFF",
        name: "Panasonic Fire TV (2024)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv-emea.html?v=ftvedition_panasonic4k",
    },
    FireOsModel {
        code: "AFTDEC012E",
        name: "Fire TV - TCL S4/S5/Q5/Q6 Series 4K UHD HDR LED (2024)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=tcl_s4s5q5q6_2024",
    },
    FireOsModel {
        code: "AFTBTX4",
        name: "Redmi 108cm (43 inches) 4K Ultra HD smart LED Fire TV (2023)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=redmi_108_f_4k_uhd_2023",
    },
    FireOsModel {
        code: "AFTMD002",
        name: "TCL Class S3 1080p LED Smart TV with Fire TV (2023)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=tclclass_s3_1080_2023",
    },
    FireOsModel {
        code: "AFTKRT",
        name: "Fire TV Stick 4K Max - 2nd Gen (2023) - 16 GB",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-stick.html?v=ftvstick4kmax_gen2_16",
    },
    FireOsModel {
        code: "AFTKM",
        name: "Fire TV Stick 4K - 2nd Gen (2023) - 8 GB",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-stick.html?v=ftvstick4k_gen2_8",
    },
    FireOsModel {
        code: "AFTSHN02",
        name: "TCL 32\" FHD, 40\" FHD Fire TV (2023)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=tclsmart_fhd__led_2023",
    },
    FireOsModel {
        code: "AFTMD001",
        name: "Fire TV - TCL S4 Series 4K UHD HDR LED (2023)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=tclsseries_4K_2023",
    },
    FireOsModel {
        code: "AFTKA002",
        name: "Fire TV 2-Series (2023)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=2series2023",
    },
    FireOsModel {
        code: "AFTKAUK002",
        name: "Fire TV 2-Series (2023)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=2series2023",
    },
    FireOsModel {
        code: "AFTHA004",
        name: "Toshiba 4K UHD - Fire TV (2022)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=toshiba4k2022",
    },
    FireOsModel {
        code: "AFTLBT962E2",
        name: "BMW (2022)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-automotive.html?v=BMW2022",
    },
    FireOsModel {
        code: "AEOHY",
        name: "Echo Show 15 (2021)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-echo-show.html?v=echoshow2021",
    },
    FireOsModel {
        code: "AFTTIFF43",
        name: "Fire TV Omni QLED Series (2022)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=omniseries2",
    },
    FireOsModel {
        code: "AFTGAZL",
        name: "Fire TV Cube - 3rd Gen (2022)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-cube.html?v=ftvcubegen3",
    },
    FireOsModel {
        code: "AFTANNA0",
        name: "Xiaomi F2 4K - Fire TV (2022)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=firetvedition_xiaomi2022",
    },
    FireOsModel {
        code: "AFTHA001",
        name: "Hisense U6 4K UHD - Fire TV (2022)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=firetvedition_hisense4k",
    },
    FireOsModel {
        code: "AFTMON001",
        name: "Funai 4K - Fire TV (2022)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=firetvedition_funai4k2022",
    },
    FireOsModel {
        code: "AFTMON002",
        name: "Funai 4K - Fire TV (2022)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=firetvedition_funai4k2022",
    },
    FireOsModel {
        code: "AFTJULI1",
        name: "JVC 4K - Fire TV with Freeview Play (2021)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=firetvedition_jvc4kfp",
    },
    FireOsModel {
        code: "AFTWMST22",
        name: "JVC 2K - Fire TV (2020)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=firetveditionuk_jvc2",
    },
    FireOsModel {
        code: "AFTTIFF55",
        name: "Onida HD/FHD - Fire TV (2020)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=ftveditionin_onidahd2020",
    },
    FireOsModel {
        code: "AFTWI001",
        name: "ok 4K - Fire TV (2020)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=ftveditionde_ok4k",
    },
    FireOsModel {
        code: "AFTSSS",
        name: "Fire TV Stick - 3rd Gen (2020)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-stick.html?v=ftvstickgen3",
    },
    FireOsModel {
        code: "AFTSS",
        name: "Fire TV Stick Lite - 1st Gen (2020)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-stick.html?v=ftvsticklite",
    },
    FireOsModel {
        code: "AFTDCT31",
        name: "Toshiba 4K UHD - Fire TV (2020)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=ftveditiontoshiba4k_2020",
    },
    FireOsModel {
        code: "AFTPR001",
        name: "AmazonBasics 4K - Fire TV (2020)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=ftveditionin_amazonbasics4k",
    },
    FireOsModel {
        code: "AFTBU001",
        name: "AmazonBasics HD/FHD - Fire TV (2020)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=ftveditionin_amazonbasics2k",
    },
    FireOsModel {
        code: "AFTLE",
        name: "Onida HD - Fire TV (2019)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=ftveditionin_onidahd",
    },
    FireOsModel {
        code: "AFTR",
        name: "Fire TV Cube - 2nd Gen (2019)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-cube.html?v=ftvcubegen2",
    },
    FireOsModel {
        code: "AFTEUFF014",
        name: "Grundig OLED 4K - Fire TV (2019)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=ftveditionde_grundigoled",
    },
    FireOsModel {
        code: "AFTEU014",
        name: "Grundig Vision 7, 4K - Fire TV (2019)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=ftveditionde_grundigvision7",
    },
    FireOsModel {
        code: "AFTSO001",
        name: "JVC 4K - Fire TV (2019)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=ftveditionuk_jvc4k",
    },
    FireOsModel {
        code: "AFTEU011",
        name: "Grundig Vision 6 HD - Fire TV (2019)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=ftveditionde_grundigvision6",
    },
    FireOsModel {
        code: "AFTJMST12",
        name: "Insignia 4K - Fire TV (2018)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=ftveditioninsignia4k",
    },
    FireOsModel {
        code: "AFTA",
        name: "Fire TV Cube - 1st Gen (2018)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-cube.html?v=ftvcubegen1",
    },
    FireOsModel {
        code: "AFTMM",
        name: "Fire TV Stick 4K - 1st Gen (2018)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-stick.html?v=ftvstick4k",
    },
    FireOsModel {
        code: "AFTT",
        name: "Fire TV Stick - Basic Edition (2017)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-stick.html?v=ftvstickbasicedition",
    },
    FireOsModel {
        code: "AFTRS",
        name: "Element 4K - Fire TV (2017)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=ftveditionelement",
    },
    FireOsModel {
        code: "AFTN",
        name: "Fire TV - 3rd Gen (2017)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-pendant-box.html?v=ftvgen3",
    },
    FireOsModel {
        code: "AFTS",
        name: "Fire TV - 2nd Gen (2015)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-pendant-box.html?v=ftvgen2",
    },
    FireOsModel {
        code: "AFTM",
        name: "Fire TV Stick - 1st Gen (2014)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-stick.html?v=ftvstickgen1",
    },
    FireOsModel {
        code: "AFTB",
        name: "Fire TV - 1st Gen (2014)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-pendant-box.html?v=ftvgen1",
    },
    FireOsModel {
        code: "AFTHA002",
        name: "Toshiba V35 Series LED FHD/HD - Fire TV (2021)",
        link: "https://developer.amazon.com/docs/fire-tv/device-specifications-fire-tv-edition-smart-tv.html?v=firetvedition_toshibav35",
    },
];

fn fire_os_index() -> &'static HashMap<&'static str, &'static FireOsModel> {
    static INDEX: OnceLock<HashMap<&'static str, &'static FireOsModel>> = OnceLock::new();
    INDEX.get_or_init(|| FIRE_OS_MODELS.iter().map(|m| (m.code, m)).collect())
}

pub fn fire_os_model(code: &str) -> Option<&'static FireOsModel> {
    fire_os_index().get(code.trim()).copied()
}

/// Human-readable name for a Fire OS model code; unknown codes pass through.
pub fn map_fire_os_model(model: &str) -> String {
    match fire_os_model(model) {
        Some(known) => format!("{} ({})", known.name, known.link),
        None => model.to_string(),
    }
}

pub fn map_cpu_abi(abi: &str) -> String {
    CPU_ABIS
        .iter()
        .find(|(key, _)| *key == abi.trim())
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| abi.to_string())
}

pub fn property_icon(label: &str, show_icons: bool) -> &'static str {
    if !show_icons {
        return NO_ICON;
    }
    PROPERTY_ICONS
        .iter()
        .find(|(key, _)| *key == label)
        .map(|(_, icon)| *icon)
        .unwrap_or(NO_ICON)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn known_model_gets_name_and_link() {
        let mapped = map_fire_os_model("AFTKRT");
        assert!(mapped.starts_with("Fire TV Stick 4K Max - 2nd Gen (2023) - 16 GB ("));
        assert!(mapped.ends_with("v=ftvstick4kmax_gen2_16)"));
    }

    #[test]
    fn unknown_values_pass_through() {
        assert_eq!(map_fire_os_model("Pixel 8"), "Pixel 8");
        assert_eq!(map_cpu_abi("riscv64"), "riscv64");
    }

    #[test]
    fn model_codes_are_unique() {
        let codes: HashSet<_> = FIRE_OS_MODELS.iter().map(|m| m.code).collect();
        assert_eq!(codes.len(), FIRE_OS_MODELS.len());
    }

    #[test]
    fn abi_names() {
        assert_eq!(map_cpu_abi("arm64-v8a"), "ARM 64-bit (v8a)");
        assert_eq!(map_cpu_abi("x86_64"), "Intel x86_64 (64-bit)");
    }

    #[test]
    fn icons_follow_the_toggle() {
        assert_eq!(property_icon("Battery Level", true), "🔋");
        assert_eq!(property_icon("Battery Level", false), NO_ICON);
        assert_eq!(property_icon("WiFi SSID", true), NO_ICON);
    }
}
