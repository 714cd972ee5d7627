// ==========================================
// 种植土用量计算 - 提示文案国际化
// ==========================================
// 文案目录: locales/{en,zh-CN}.yml（rust_i18n::i18n! 在 lib.rs 中加载）
// 语言为进程级设置，由 AppState 按 SOIL_LOCALE 初始化
// 占位符格式: %{name}
// ==========================================

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "zh-CN"];

pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 切换语言
///
/// # 返回
/// - false: 不支持的语言代码，当前语言不变
pub fn set_locale(locale: &str) -> bool {
    let supported = SUPPORTED_LOCALES.contains(&locale);
    if supported {
        rust_i18n::set_locale(locale);
    }
    supported
}

/// 按键取文案
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 按键取文案并填充 %{name} 占位符
///
/// # 示例
/// ```no_run
/// use soil_calculator::i18n::t_with_args;
/// let msg = t_with_args("validation.required", &[("attribute", "Length")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(t(key), |text, (name, value)| {
        text.replace(&format!("%{{{}}}", name), value)
    })
}

/// 请求字段的展示名称，例如 "length" → "Length"
pub fn attribute(field: &str) -> String {
    t(&format!("attribute.{}", field))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    // 语言是全局状态；断言文案的测试都先持有此锁
    pub(crate) static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_switch_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        assert!(set_locale("zh-CN"));
        assert_eq!(current_locale(), "zh-CN");
        assert!(set_locale("en"));
        assert_eq!(current_locale(), "en");
    }

    #[test]
    fn test_unsupported_locale_keeps_current() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert!(!set_locale("fr"));
        assert_eq!(current_locale(), "en");
    }

    #[test]
    fn test_attribute_names() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(attribute("length"), "Length");
        assert_eq!(attribute("soil_type"), "Soil type");
        assert_eq!(t("message.check_input"), "Please check your input and try again.");
    }

    #[test]
    fn test_placeholders_filled() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(
            t_with_args("validation.max_meters", &[("attribute", "Length"), ("max", "10,000")]),
            "Length cannot exceed 10,000 meters"
        );

        set_locale("zh-CN");
        let msg = t_with_args("validation.required", &[("attribute", "长度")]);
        assert!(msg.contains("长度"));
        assert!(!msg.contains("%{"));

        set_locale("en");
    }
}
