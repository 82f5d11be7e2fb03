use std::sync::RwLock;

use forgather_models::{Direction, Language};

/// Current language and text direction, explicitly owned by the application
/// shell and injected into workflows. Direction is always derived from the
/// language, so the two cannot drift apart.
pub struct LocaleState {
    language: RwLock<Language>,
}

impl LocaleState {
    pub fn new(default: Language) -> Self {
        Self {
            language: RwLock::new(default),
        }
    }

    pub fn language(&self) -> Language {
        match self.language.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Direction for the document `dir` attribute.
    pub fn direction(&self) -> Direction {
        self.language().direction()
    }

    pub fn set_language(&self, language: Language) {
        let mut guard = match self.language.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = language;
    }

    /// Flip between the two supported languages, returning the new one.
    pub fn toggle(&self) -> Language {
        let mut guard = match self.language.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = match *guard {
            Language::Ar => Language::En,
            Language::En => Language::Ar,
        };
        *guard
    }

    /// Resolve a catalog key in the current language. Unknown keys fall back
    /// to the key itself so a missing translation is visible, not a panic.
    pub fn text(&self, key: &'static str) -> &'static str {
        resolve(self.language(), key).unwrap_or(key)
    }
}

fn resolve(language: Language, key: &str) -> Option<&'static str> {
    let (ar, en) = match key {
        "auth.login_required" => ("يرجى تسجيل الدخول أولاً", "Please log in first"),
        "vote.too_many_selections" => (
            "عدد الاختيارات يتجاوز الحد المسموح به",
            "Too many selections for this session",
        ),
        "vote.session_closed" => (
            "جلسة التصويت مغلقة أو انتهى موعدها",
            "This voting session is closed",
        ),
        "vote.unknown_session" => (
            "جلسة التصويت غير محمّلة بعد",
            "This voting session has not been loaded",
        ),
        "vote.submitted" => ("تم تسجيل صوتك بنجاح", "Your vote has been recorded"),
        "vote.session_created" => ("تم إنشاء جلسة التصويت", "Voting session created"),
        "discussion.posted" => ("تم نشر الرسالة", "Message posted"),
        "join.requested" => ("تم إرسال طلب الانضمام", "Join request submitted"),
        "join.terms_required" => (
            "يجب الموافقة على الشروط والأحكام",
            "You must accept the terms and conditions",
        ),
        "join.points_held" => (
            "سيتم حجز النقاط حتى اكتمال المجموعة",
            "Points will be held until the group activates",
        ),
        "join.points_deducted" => (
            "سيتم خصم النقاط فوراً",
            "Points will be deducted immediately",
        ),
        "error.validation" => ("البيانات المدخلة غير صالحة", "The submitted data is invalid"),
        "error.network" => ("تعذر الاتصال بالخادم", "Could not reach the server"),
        "error.unauthorized" => (
            "انتهت صلاحية الجلسة، يرجى تسجيل الدخول مجدداً",
            "Session expired, please log in again",
        ),
        "error.rejected" => ("رفض الخادم هذا الطلب", "The server rejected the request"),
        "error.response" => (
            "استجابة غير متوقعة من الخادم",
            "Unexpected response from the server",
        ),
        "error.config" => ("إعدادات الاتصال غير صالحة", "Invalid connection settings"),
        "gateway.procurement.title" => ("بوابة الشراء الجماعي", "Group Purchasing Gateway"),
        "gateway.procurement.description" => (
            "تجميع طلبات الشراء للحصول على أسعار أفضل",
            "Pool purchase orders to unlock better pricing",
        ),
        "gateway.marketing.title" => ("بوابة التسويق التعاوني", "Cooperative Marketing Gateway"),
        "gateway.marketing.description" => (
            "حملات تسويقية مشتركة بين الأعضاء",
            "Shared marketing campaigns across members",
        ),
        "gateway.company_formation.title" => ("بوابة تأسيس الشركات", "Company Formation Gateway"),
        "gateway.company_formation.description" => (
            "تأسيس شركات مشتركة بين مجموعات الأعضاء",
            "Form joint companies between member groups",
        ),
        "gateway.freelance.title" => ("بوابة العمل الحر", "Freelance Gateway"),
        "gateway.freelance.description" => (
            "فرص عمل حر ومناقصات للمستقلين",
            "Freelance opportunities and tenders",
        ),
        "gateway.investment.title" => ("بوابة الاستثمار الجماعي", "Group Investment Gateway"),
        "gateway.investment.description" => (
            "فرص استثمارية جماعية للأعضاء",
            "Collective investment opportunities",
        ),
        _ => return None,
    };
    Some(match language {
        Language::Ar => ar,
        Language::En => en,
    })
}
