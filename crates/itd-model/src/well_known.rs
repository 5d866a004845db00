//! Frequently referenced types

use crate::java_type::JavaType;
use once_cell::sync::Lazy;

macro_rules! reference_types {
    ($($(#[$meta:meta])* $name:ident => $fqn:literal;)*) => {
        $(
            $(#[$meta])*
            pub static $name: Lazy<JavaType> = Lazy::new(|| JavaType::new($fqn));
        )*
    };
}

macro_rules! primitive_types {
    ($($name:ident => $boxed:literal;)*) => {
        $(
            pub static $name: Lazy<JavaType> = Lazy::new(|| JavaType::primitive($boxed));
        )*
    };
}

// java.lang / java.util / java.math
reference_types! {
    OBJECT => "java.lang.Object";
    STRING => "java.lang.String";
    BOOLEAN_OBJECT => "java.lang.Boolean";
    CHAR_OBJECT => "java.lang.Character";
    BYTE_OBJECT => "java.lang.Byte";
    SHORT_OBJECT => "java.lang.Short";
    INT_OBJECT => "java.lang.Integer";
    LONG_OBJECT => "java.lang.Long";
    FLOAT_OBJECT => "java.lang.Float";
    DOUBLE_OBJECT => "java.lang.Double";
    ILLEGAL_STATE_EXCEPTION => "java.lang.IllegalStateException";
    BIG_DECIMAL => "java.math.BigDecimal";
    BIG_INTEGER => "java.math.BigInteger";
    DATE => "java.util.Date";
    CALENDAR => "java.util.Calendar";
    GREGORIAN_CALENDAR => "java.util.GregorianCalendar";
    RANDOM => "java.util.Random";
    SECURE_RANDOM => "java.security.SecureRandom";
    LIST => "java.util.List";
    ARRAYS => "java.util.Arrays";
    ARRAY_LIST => "java.util.ArrayList";
    ITERATOR => "java.util.Iterator";
    UNSUPPORTED_ENCODING_EXCEPTION => "java.io.UnsupportedEncodingException";
    PROPERTY_EDITOR_SUPPORT => "java.beans.PropertyEditorSupport";
}

primitive_types! {
    BOOLEAN_PRIMITIVE => "java.lang.Boolean";
    CHAR_PRIMITIVE => "java.lang.Character";
    BYTE_PRIMITIVE => "java.lang.Byte";
    SHORT_PRIMITIVE => "java.lang.Short";
    INT_PRIMITIVE => "java.lang.Integer";
    LONG_PRIMITIVE => "java.lang.Long";
    FLOAT_PRIMITIVE => "java.lang.Float";
    DOUBLE_PRIMITIVE => "java.lang.Double";
    VOID_PRIMITIVE => "java.lang.Void";
}

/// `byte[]`
pub static BYTE_ARRAY_PRIMITIVE: Lazy<JavaType> =
    Lazy::new(|| JavaType::primitive("java.lang.Byte").with_array(1));

/// `String[]`
pub static STRING_ARRAY: Lazy<JavaType> =
    Lazy::new(|| JavaType::new("java.lang.String").with_array(1));

// Bean validation and persistence
reference_types! {
    SIZE => "javax.validation.constraints.Size";
    MIN => "javax.validation.constraints.Min";
    MAX => "javax.validation.constraints.Max";
    DIGITS => "javax.validation.constraints.Digits";
    DECIMAL_MIN => "javax.validation.constraints.DecimalMin";
    DECIMAL_MAX => "javax.validation.constraints.DecimalMax";
    PAST => "javax.validation.constraints.Past";
    FUTURE => "javax.validation.constraints.Future";
    VALID => "javax.validation.Valid";
    CONSTRAINT_VIOLATION => "javax.validation.ConstraintViolation";
    CONSTRAINT_VIOLATION_EXCEPTION => "javax.validation.ConstraintViolationException";
    EMAIL => "org.hibernate.validator.constraints.Email";
    EMBEDDABLE => "javax.persistence.Embeddable";
    COLUMN => "javax.persistence.Column";
    TEMPORAL => "javax.persistence.Temporal";
    TEMPORAL_TYPE => "javax.persistence.TemporalType";
    TRANSIENT => "javax.persistence.Transient";
}

// Spring
reference_types! {
    COMPONENT => "org.springframework.stereotype.Component";
    CONTROLLER => "org.springframework.stereotype.Controller";
    AUTOWIRED => "org.springframework.beans.factory.annotation.Autowired";
    SIMPLE_TYPE_CONVERTER => "org.springframework.beans.SimpleTypeConverter";
    CONVERSION_SERVICE => "org.springframework.core.convert.ConversionService";
    DATE_TIME_FORMAT => "org.springframework.format.annotation.DateTimeFormat";
    DATE_TIME_FORMAT_UTILS => "org.joda.time.format.DateTimeFormat";
    LOCALE_CONTEXT_HOLDER => "org.springframework.context.i18n.LocaleContextHolder";
    MODEL => "org.springframework.ui.Model";
    BINDING_RESULT => "org.springframework.validation.BindingResult";
    REQUEST_MAPPING => "org.springframework.web.bind.annotation.RequestMapping";
    REQUEST_METHOD => "org.springframework.web.bind.annotation.RequestMethod";
    REQUEST_PARAM => "org.springframework.web.bind.annotation.RequestParam";
    PATH_VARIABLE => "org.springframework.web.bind.annotation.PathVariable";
    HTTP_SERVLET_REQUEST => "javax.servlet.http.HttpServletRequest";
    WEB_UTILS => "org.springframework.web.util.WebUtils";
    URI_UTILS => "org.springframework.web.util.UriUtils";
}

// Generator markers
reference_types! {
    ROO_PLURAL => "org.springframework.roo.addon.plural.RooPlural";
    ENUMERATED => "javax.persistence.Enumerated";
    ONE_TO_ONE => "javax.persistence.OneToOne";
    MANY_TO_ONE => "javax.persistence.ManyToOne";
    ID => "javax.persistence.Id";
    EMBEDDED_ID => "javax.persistence.EmbeddedId";
    EMBEDDED => "javax.persistence.Embedded";
    VERSION => "javax.persistence.Version";
}

/// `java.util.List<element>`
#[must_use]
pub fn list_of(element: &JavaType) -> JavaType {
    LIST.clone().with_parameters(vec![element.clone()])
}
