//! Enumerations of the metamodel with their wire literals.
//!
//! Every enumeration is rendered identically by the structural (JSON) and the
//! XML encoder, so each one carries exactly one literal per variant.

// ============================================================================
// Helper macro
// ============================================================================

macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $lit:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The wire literal of this variant.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $lit),+
                }
            }

            /// Parse a wire literal; `None` for unknown text.
            pub fn from_str_literal(text: &str) -> Option<Self> {
                match text {
                    $($lit => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl Literal for $name {
            const TYPE_NAME: &'static str = stringify!($name);

            fn literal(self) -> &'static str {
                self.as_str()
            }

            fn from_literal(text: &str) -> Option<Self> {
                Self::from_str_literal(text)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Common interface of the literal enumerations, used by the decoders.
pub trait Literal: Copy + Sized + 'static {
    /// Name of the enumeration, for error messages.
    const TYPE_NAME: &'static str;

    fn literal(self) -> &'static str;

    fn from_literal(text: &str) -> Option<Self>;
}

// ============================================================================
// Enumerations
// ============================================================================

literal_enum! {
    /// Whether an element is a template or an instance.
    pub enum ModellingKind {
        Template => "Template",
        Instance => "Instance",
    }
}

literal_enum! {
    pub enum AssetKind {
        Type => "Type",
        Instance => "Instance",
        NotApplicable => "NotApplicable",
    }
}

literal_enum! {
    pub enum QualifierKind {
        ValueQualifier => "ValueQualifier",
        ConceptQualifier => "ConceptQualifier",
        TemplateQualifier => "TemplateQualifier",
    }
}

literal_enum! {
    pub enum ReferenceTypes {
        ExternalReference => "ExternalReference",
        ModelReference => "ModelReference",
    }
}

literal_enum! {
    /// Type of a key in a reference chain.
    pub enum KeyTypes {
        AnnotatedRelationshipElement => "AnnotatedRelationshipElement",
        AssetAdministrationShell => "AssetAdministrationShell",
        BasicEventElement => "BasicEventElement",
        Blob => "Blob",
        Capability => "Capability",
        ConceptDescription => "ConceptDescription",
        DataElement => "DataElement",
        Entity => "Entity",
        EventElement => "EventElement",
        File => "File",
        FragmentReference => "FragmentReference",
        GlobalReference => "GlobalReference",
        Identifiable => "Identifiable",
        MultiLanguageProperty => "MultiLanguageProperty",
        Operation => "Operation",
        Property => "Property",
        Range => "Range",
        Referable => "Referable",
        ReferenceElement => "ReferenceElement",
        RelationshipElement => "RelationshipElement",
        Submodel => "Submodel",
        SubmodelElement => "SubmodelElement",
        SubmodelElementCollection => "SubmodelElementCollection",
        SubmodelElementList => "SubmodelElementList",
    }
}

literal_enum! {
    /// XML Schema datatypes a property value may declare.
    pub enum DataTypeDefXsd {
        AnyUri => "xs:anyURI",
        Base64Binary => "xs:base64Binary",
        Boolean => "xs:boolean",
        Byte => "xs:byte",
        Date => "xs:date",
        DateTime => "xs:dateTime",
        Decimal => "xs:decimal",
        Double => "xs:double",
        Duration => "xs:duration",
        Float => "xs:float",
        GDay => "xs:gDay",
        GMonth => "xs:gMonth",
        GMonthDay => "xs:gMonthDay",
        GYear => "xs:gYear",
        GYearMonth => "xs:gYearMonth",
        HexBinary => "xs:hexBinary",
        Int => "xs:int",
        Integer => "xs:integer",
        Long => "xs:long",
        NegativeInteger => "xs:negativeInteger",
        NonNegativeInteger => "xs:nonNegativeInteger",
        NonPositiveInteger => "xs:nonPositiveInteger",
        PositiveInteger => "xs:positiveInteger",
        Short => "xs:short",
        String => "xs:string",
        Time => "xs:time",
        UnsignedByte => "xs:unsignedByte",
        UnsignedInt => "xs:unsignedInt",
        UnsignedLong => "xs:unsignedLong",
        UnsignedShort => "xs:unsignedShort",
    }
}

impl DataTypeDefXsd {
    /// Integer-valued types (any width, signed or not).
    pub fn is_integral(self) -> bool {
        matches!(
            self,
            Self::Byte
                | Self::Int
                | Self::Integer
                | Self::Long
                | Self::NegativeInteger
                | Self::NonNegativeInteger
                | Self::NonPositiveInteger
                | Self::PositiveInteger
                | Self::Short
                | Self::UnsignedByte
                | Self::UnsignedInt
                | Self::UnsignedLong
                | Self::UnsignedShort
        )
    }

    /// Floating-point and decimal types.
    pub fn is_floating(self) -> bool {
        matches!(self, Self::Decimal | Self::Double | Self::Float)
    }
}

literal_enum! {
    /// Kind of the items held by a submodel element list.
    pub enum AasSubmodelElements {
        AnnotatedRelationshipElement => "AnnotatedRelationshipElement",
        BasicEventElement => "BasicEventElement",
        Blob => "Blob",
        Capability => "Capability",
        DataElement => "DataElement",
        Entity => "Entity",
        EventElement => "EventElement",
        File => "File",
        MultiLanguageProperty => "MultiLanguageProperty",
        Operation => "Operation",
        Property => "Property",
        Range => "Range",
        ReferenceElement => "ReferenceElement",
        RelationshipElement => "RelationshipElement",
        SubmodelElement => "SubmodelElement",
        SubmodelElementCollection => "SubmodelElementCollection",
        SubmodelElementList => "SubmodelElementList",
    }
}

literal_enum! {
    pub enum EntityType {
        CoManagedEntity => "CoManagedEntity",
        SelfManagedEntity => "SelfManagedEntity",
    }
}

literal_enum! {
    pub enum Direction {
        Input => "input",
        Output => "output",
    }
}

literal_enum! {
    pub enum StateOfEvent {
        On => "on",
        Off => "off",
    }
}

literal_enum! {
    /// Data types of the IEC 61360 data specification.
    pub enum DataTypeIec61360 {
        Date => "DATE",
        String => "STRING",
        StringTranslatable => "STRING_TRANSLATABLE",
        IntegerMeasure => "INTEGER_MEASURE",
        IntegerCount => "INTEGER_COUNT",
        IntegerCurrency => "INTEGER_CURRENCY",
        RealMeasure => "REAL_MEASURE",
        RealCount => "REAL_COUNT",
        RealCurrency => "REAL_CURRENCY",
        Boolean => "BOOLEAN",
        Iri => "IRI",
        Irdi => "IRDI",
        Rational => "RATIONAL",
        RationalMeasure => "RATIONAL_MEASURE",
        Time => "TIME",
        Timestamp => "TIMESTAMP",
        File => "FILE",
        Html => "HTML",
        Blob => "BLOB",
    }
}
