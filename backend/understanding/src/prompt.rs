/// Instruction sent alongside every image.
///
/// Asks for a verbatim transcription of the Persian text: same lines and
/// spacing, Persian letters and digits untouched, right-to-left order kept,
/// punctuation and Arabic digits unchanged, and any English text marked
/// separately.
pub const PERSIAN_OCR_PROMPT: &str = "
تمام متن فارسی موجود در تصویر را دقیقاً به همان شکل استخراج کن. موارد زیر را رعایت کن:
۱. متن را دقیقاً با همان خط و فاصله‌ها بنویس
۲. حروف و اعداد فارسی را کاملاً حفظ کن
۳. جهت نوشتار راست به چپ را حفظ کن
۴. علائم نگارشی و اعداد عربی را تغییر نده
۵. اگر متن انگلیسی هم وجود دارد، آن را جداگانه مشخص کن
";
